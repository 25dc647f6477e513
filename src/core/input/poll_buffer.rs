//=========================================================================
// Poll Buffers
//=========================================================================
//
// Raw per-frame input snapshot, recorded alongside the queued event stream
// for consumers that poll device state directly instead of reading events.
//
// Each buffer has a soft limit and a small headroom past it:
//   count <  limit              accepted, add returns true
//   limit <= count < hard cap   accepted, add returns false (saturated)
//   count == hard cap           dropped, add returns false
//
// A `false` return tells the producer to stop pumping for this frame; the
// headroom absorbs the handful of entries a single notification can add
// after the limit is hit (mouse motion adds two).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::keys::KeyNum;

//=== Constants ===========================================================

/// Soft entry limit per buffer per frame.
pub const MAX_POLL_EVENTS: usize = 50;

/// Entries accepted past the soft limit before dropping.
pub const POLL_EVENTS_HEADROOM: usize = 2;

//=== Poll Entries ========================================================

/// One raw keyboard transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardPoll {
    pub key: KeyNum,
    pub down: bool,
}

/// Raw mouse channel a [`MousePoll`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    DeltaX,
    DeltaY,
    /// Wheel detents, +1 up, -1 down.
    DeltaZ,
    /// Button by engine index (0 = first button); value is 1 / 0.
    Button(u8),
}

/// One raw mouse sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MousePoll {
    pub action: MouseAction,
    pub value: i32,
}

//=== PollBuffer ==========================================================

/// Bounded per-frame list of raw samples.
#[derive(Debug, Clone)]
pub struct PollBuffer<T> {
    entries: Vec<T>,
    limit: usize,
    headroom: usize,
    name: &'static str,
}

impl<T> PollBuffer<T> {
    pub fn new(name: &'static str, limit: usize, headroom: usize) -> Self {
        Self {
            entries: Vec::with_capacity(limit + headroom),
            limit,
            headroom,
            name,
        }
    }

    /// Records an entry. Returns `false` once the soft limit is reached.
    pub fn push(&mut self, entry: T) -> bool {
        if self.entries.len() >= self.limit + self.headroom {
            warn!(
                target: "platform::input",
                "{} poll buffer full ({} entries), dropping sample",
                self.name,
                self.entries.len()
            );
            return false;
        }

        self.entries.push(entry);
        !self.is_saturated()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` once the soft limit has been reached this frame.
    pub fn is_saturated(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the entries out, keeping the allocation for the next frame.
    pub fn take(&mut self) -> Vec<T> {
        let mut taken = Vec::with_capacity(self.entries.len());
        taken.append(&mut self.entries);
        taken
    }
}

//=== PollBuffers =========================================================

/// Keyboard and mouse poll buffers for one frame.
#[derive(Debug, Clone)]
pub struct PollBuffers {
    keyboard: PollBuffer<KeyboardPoll>,
    mouse: PollBuffer<MousePoll>,
}

/// Snapshot moved out of [`PollBuffers`] at the end of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollSnapshot {
    pub keyboard: Vec<KeyboardPoll>,
    pub mouse: Vec<MousePoll>,
}

impl PollSnapshot {
    pub fn is_empty(&self) -> bool {
        self.keyboard.is_empty() && self.mouse.is_empty()
    }
}

impl PollBuffers {
    pub fn new() -> Self {
        Self::with_limits(MAX_POLL_EVENTS, POLL_EVENTS_HEADROOM)
    }

    pub fn with_limits(limit: usize, headroom: usize) -> Self {
        Self {
            keyboard: PollBuffer::new("Keyboard", limit, headroom),
            mouse: PollBuffer::new("Mouse", limit, headroom),
        }
    }

    //--- Producer ---------------------------------------------------------

    /// Records a keyboard transition. Returns `false` on overflow.
    pub fn add_keyboard_event(&mut self, key: KeyNum, down: bool) -> bool {
        self.keyboard.push(KeyboardPoll { key, down })
    }

    /// Records a mouse sample. Returns `false` on overflow.
    pub fn add_mouse_event(&mut self, action: MouseAction, value: i32) -> bool {
        self.mouse.push(MousePoll { action, value })
    }

    //--- Consumer ---------------------------------------------------------

    pub fn keyboard(&self) -> &[KeyboardPoll] {
        self.keyboard.entries()
    }

    pub fn mouse(&self) -> &[MousePoll] {
        self.mouse.entries()
    }

    /// Ends the frame: moves both buffers out and resets them.
    pub fn take(&mut self) -> PollSnapshot {
        PollSnapshot {
            keyboard: self.keyboard.take(),
            mouse: self.mouse.take(),
        }
    }

    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.mouse.clear();
    }
}

impl Default for PollBuffers {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
