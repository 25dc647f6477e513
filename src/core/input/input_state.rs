//=========================================================================
// Input State
//
// Maintains the engine's input snapshot.
// Consumes drained `SysEvent`s strictly in queue order and updates
// persistent state (held keys, wheel counter, pointer position) and
// per-tick accumulators (mouse delta, typed text).
//
// Responsibilities:
// - Track held keys and mouse buttons by engine key number
// - Accumulate relative mouse motion between ticks
// - Count wheel detents (edge-triggered, never held)
// - Collect decoded characters typed during the tick
//
// Notes:
// This module is internal to the InputSystem and not exposed directly.
// OS callbacks never touch it; only drained events do.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;
use std::fmt;

//=== External Crates =====================================================
use log::trace;

//=== Internal Modules ====================================================
use super::event::{SysEvent, SysEventKind};
use super::keys::{is_wheel_key, KeyNum, K_MWHEELUP, K_NONE};

//=== InputState ==========================================================

pub(super) struct InputState {
    pub(super) keys_down: HashSet<KeyNum>,
    pub(super) mouse_delta: (i32, i32),
    pub(super) mouse_position: (i32, i32),
    pub(super) wheel: i32,
    pub(super) typed: String,
    pub(super) has_changed: bool,
}

impl InputState {
    //--- Constructor ------------------------------------------------------

    pub(super) fn new() -> Self {
        const KEYS_BASE: usize = 32;
        Self {
            keys_down: HashSet::with_capacity(KEYS_BASE),
            mouse_delta: (0, 0),
            mouse_position: (0, 0),
            wheel: 0,
            typed: String::new(),
            has_changed: false,
        }
    }

    //--- begin_tick() -----------------------------------------------------
    //
    // Resets per-tick accumulators. Held keys, wheel and position persist.
    //
    pub(super) fn begin_tick(&mut self) {
        self.mouse_delta = (0, 0);
        self.typed.clear();
        self.has_changed = false;
    }

    //--- apply_events() ---------------------------------------------------
    //
    // Applies events in order. Sets `has_changed` if anything moved.
    //
    pub(super) fn apply_events(&mut self, events: &[SysEvent]) {
        for event in events {
            let changed = self.apply(event);
            self.has_changed |= changed;
        }
    }

    fn apply(&mut self, event: &SysEvent) -> bool {
        match event.kind {
            SysEventKind::Key => self.apply_key(event.value, event.value2 != 0),

            SysEventKind::Char => match u8::try_from(event.value) {
                Ok(byte) if byte != 0 => {
                    self.typed.push(char::from(byte));
                    true
                }
                _ => {
                    trace!(target: "input", "Ignoring out-of-range char {}", event.value);
                    false
                }
            },

            SysEventKind::Mouse => {
                self.mouse_delta.0 = self.mouse_delta.0.saturating_add(event.value);
                self.mouse_delta.1 = self.mouse_delta.1.saturating_add(event.value2);
                event.value != 0 || event.value2 != 0
            }

            SysEventKind::MouseAbsolute => {
                let position = (event.value, event.value2);
                let changed = self.mouse_position != position;
                self.mouse_position = position;
                changed
            }

            SysEventKind::None => false,
        }
    }

    fn apply_key(&mut self, key: KeyNum, down: bool) -> bool {
        if key == K_NONE {
            return false;
        }

        if is_wheel_key(key) {
            if down {
                self.wheel = self.wheel.saturating_add(if key == K_MWHEELUP { 1 } else { -1 });
                return true;
            }
            return false;
        }

        if down {
            self.keys_down.insert(key)
        } else {
            self.keys_down.remove(&key)
        }
    }

    //--- release_all() ----------------------------------------------------
    //
    // Drops every held key, e.g. when the window loses focus and the
    // matching releases will never arrive.
    //
    pub(super) fn release_all(&mut self) {
        if !self.keys_down.is_empty() {
            self.keys_down.clear();
            self.has_changed = true;
        }
    }
}

//=== Debug Trait =========================================================
//
// Example:
//
// ```text
// InputState {
//     held: [119, 187],
//     mouse_delta: (4, -2),
//     wheel: 3,
//     typed: "w",
//     has_changed: true
// }
// ```
//
impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut held: Vec<_> = self.keys_down.iter().copied().collect();
        held.sort_unstable();

        f.debug_struct("InputState")
            .field("held", &held)
            .field("mouse_delta", &self.mouse_delta)
            .field("mouse_position", &self.mouse_position)
            .field("wheel", &self.wheel)
            .field("typed", &self.typed)
            .field("has_changed", &self.has_changed)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
