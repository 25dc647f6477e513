//=========================================================================
// System Event Types
//
// Defines the engine-neutral representation of a queued input event.
//
// Every OS notification the platform layer understands is normalized into
// a `SysEvent`: a kind tag, two integer values whose meaning depends on
// the kind, and an optional owned byte payload.
//
// Value layout per kind:
// ```text
//  kind            value          value2
//  ─────────────   ────────────   ────────────────────
//  None            0              0
//  Key             key number     1 = pressed, 0 = released
//  Char            character      0
//  Mouse           dx             dy
//  MouseAbsolute   x              y
// ```
//
// Payload ownership:
//   producer ──move──> EventQueue slot ──move──> consumer
// The payload type is move-only, so a buffer is released exactly once,
// by whoever holds it last.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::keys::KeyNum;

//=== SysEventKind ========================================================

/// Discriminates what a [`SysEvent`]'s values mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SysEventKind {
    /// Empty sentinel returned by an empty queue.
    #[default]
    None,

    /// Key press or release; also mouse buttons and wheel detents.
    Key,

    /// Decoded character produced alongside a key press.
    Char,

    /// Relative mouse motion.
    Mouse,

    /// Absolute pointer position.
    MouseAbsolute,
}

//=== EventPayload ========================================================

/// Owned, variable-length data attached to an event.
///
/// Deliberately not `Clone`: the buffer has exactly one owner at a time.
#[derive(Debug, PartialEq, Eq)]
pub struct EventPayload(Box<[u8]>);

impl EventPayload {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Takes the buffer out of the payload.
    pub fn into_bytes(self) -> Box<[u8]> {
        self.0
    }
}

impl From<Vec<u8>> for EventPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

//=== SysEvent ============================================================

/// One normalized input event.
///
/// `SysEvent::default()` is the empty sentinel (`kind == None`).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SysEvent {
    pub kind: SysEventKind,
    pub value: i32,
    pub value2: i32,
    pub payload: Option<EventPayload>,
}

impl SysEvent {
    //--- Construction -----------------------------------------------------

    /// The empty sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn key(key: KeyNum, down: bool) -> Self {
        Self::with_values(SysEventKind::Key, key, i32::from(down))
    }

    pub fn char(ch: u8) -> Self {
        Self::with_values(SysEventKind::Char, i32::from(ch), 0)
    }

    pub fn mouse(dx: i32, dy: i32) -> Self {
        Self::with_values(SysEventKind::Mouse, dx, dy)
    }

    pub fn mouse_absolute(x: i32, y: i32) -> Self {
        Self::with_values(SysEventKind::MouseAbsolute, x, y)
    }

    fn with_values(kind: SysEventKind, value: i32, value2: i32) -> Self {
        Self {
            kind,
            value,
            value2,
            payload: None,
        }
    }

    /// Attaches an owned payload, replacing any previous one.
    pub fn with_payload(mut self, payload: impl Into<EventPayload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` for the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.kind == SysEventKind::None
    }

    /// For KEY events, whether this is a press.
    pub fn key_down(&self) -> bool {
        self.kind == SysEventKind::Key && self.value2 != 0
    }

    /// Moves the payload out, leaving `None`.
    pub fn take_payload(&mut self) -> Option<EventPayload> {
        self.payload.take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
