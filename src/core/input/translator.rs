//=========================================================================
// Input Translator
//=========================================================================
//
// Normalizes raw platform notifications into queued `SysEvent`s and raw
// poll samples.
//
// Architecture:
//   InputSource ──poll()──> RawInput ──handle()──┬──> EventQueue
//                                                ├──> PollBuffers
//                                                └──> PointerHost (warp)
//
// Policies:
// - Keyboard: a decoded character on press adds a CHAR event after the
//   KEY event. Printable key numbers (33..=126) that arrive without a
//   character are dead/compose keys and are zeroed; `"` and `;` are the
//   two exceptions. Characters with the high bit set never become CHAR.
// - Motion: only while grabbed. The first sample of a pump is measured
//   from the viewport midpoint, later ones from the previous sample, and
//   the pointer is warped back to the midpoint. The notification that warp
//   produces lands exactly on the midpoint; it is discarded and the
//   reference returns to the midpoint.
// - Wheel: ordinals 4/5 become one-shot presses of the wheel keys. Their
//   releases are ignored.
// - Buttons: fixed ordinal table; unknown ordinals are logged and dropped.
//
// The translator holds no state besides the grab flag and the motion
// reference of the pump in progress.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::SysEvent;
use super::event_queue::EventQueue;
use super::keys::{KeyNum, K_DEL, K_MOUSE1, K_MWHEELDOWN, K_MWHEELUP, K_NONE};
use super::poll_buffer::{MouseAction, PollBuffers};

//=== RawInput ============================================================

/// Platform notification, already mapped onto engine key numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// Key pressed. `unicode` is the decoded character, 0 if none.
    KeyDown { key: KeyNum, unicode: u32 },

    /// Key released.
    KeyUp { key: KeyNum },

    /// Pointer moved to absolute window coordinates.
    Motion { x: i32, y: i32 },

    /// Button pressed; 1 left, 2 middle, 3 right, 4/5 wheel, 6/7 extra.
    ButtonDown(u8),

    /// Button released; same ordinals as `ButtonDown`.
    ButtonUp(u8),
}

//=== Collaborators =======================================================

/// Non-blocking source of pending raw notifications.
pub trait InputSource {
    /// Returns the next pending notification, or `None` when drained.
    fn poll(&mut self) -> Option<RawInput>;
}

impl InputSource for VecDeque<RawInput> {
    fn poll(&mut self) -> Option<RawInput> {
        self.pop_front()
    }
}

/// Windowing-layer services needed for relative mouse look.
pub trait PointerHost {
    /// Current viewport size in pixels.
    fn viewport_size(&self) -> (i32, i32);

    /// Moves the OS pointer to viewport coordinates.
    fn warp_pointer(&mut self, x: i32, y: i32);
}

//=== Key Translation =====================================================

/// Result of translating one key notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTranslation {
    /// Engine key number, `K_NONE` when suppressed.
    pub key: KeyNum,

    /// Character to report as a CHAR event.
    pub character: Option<u8>,
}

const ASCII_DELETE: u8 = 127;
const ASCII_BACKSPACE: u8 = 8;

/// Applies the character and dead-key policies to one key notification.
pub fn translate_key(key: KeyNum, unicode: u32, down: bool) -> KeyTranslation {
    let mut character = None;

    if down && (1..=0xFF).contains(&unicode) {
        let ch = unicode as u8;
        character = Some(if ch == ASCII_DELETE && key != K_DEL {
            // ctrl-h
            ASCII_BACKSPACE
        } else {
            ch
        });
    }

    let mut key = key;
    if down && unicode == 0 && is_dead_key_candidate(key) {
        key = K_NONE;
    }

    KeyTranslation {
        key,
        character: character.filter(|&ch| ch & 0x80 == 0),
    }
}

fn is_dead_key_candidate(key: KeyNum) -> bool {
    key > 32 && key < 127 && key != KeyNum::from(b'"') && key != KeyNum::from(b';')
}

/// Maps a button ordinal to the engine button index.
pub fn button_index(ordinal: u8) -> Option<u8> {
    match ordinal {
        1 => Some(0),
        2 => Some(2),
        3 => Some(1),
        6 => Some(3),
        7 => Some(4),
        _ => None,
    }
}

const WHEEL_UP: u8 = 4;
const WHEEL_DOWN: u8 = 5;

//=== PumpStatus ==========================================================

/// Whether the pump may keep consuming notifications this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    Continue,
    /// A poll buffer reached its limit; resume next frame.
    Saturated,
}

impl PumpStatus {
    fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Continue
        } else {
            Self::Saturated
        }
    }
}

//=== InputTranslator =====================================================

/// Converts raw notifications into queued events and poll samples.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    grabbed: bool,

    /// Last motion sample handled since the pointer was re-centred.
    motion_origin: Option<(i32, i32)>,
}

impl InputTranslator {
    //--- Construction -----------------------------------------------------

    pub fn new(grabbed: bool) -> Self {
        Self {
            grabbed,
            motion_origin: None,
        }
    }

    //--- Grab State -------------------------------------------------------

    /// Enables or disables relative motion translation.
    pub fn set_grab(&mut self, grabbed: bool) {
        if self.grabbed != grabbed {
            debug!(target: "platform::input", "Input grab {}", if grabbed { "on" } else { "off" });
        }
        self.grabbed = grabbed;
        self.motion_origin = None;
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    //--- Pumping ----------------------------------------------------------

    /// Sweeps every pending notification from `source`.
    ///
    /// Stops early when a poll buffer saturates; whatever is still pending
    /// stays in `source` for the next frame. Returns the number of
    /// notifications consumed. The motion reference returns to the
    /// midpoint when the pump ends, since the last warp lands before the
    /// next frame's samples.
    pub fn pump<S, P>(
        &mut self,
        source: &mut S,
        queue: &mut EventQueue,
        polls: &mut PollBuffers,
        pointer: &mut P,
    ) -> usize
    where
        S: InputSource + ?Sized,
        P: PointerHost + ?Sized,
    {
        let mut consumed = 0;

        while let Some(raw) = source.poll() {
            consumed += 1;
            if self.handle(raw, queue, polls, pointer) == PumpStatus::Saturated {
                debug!(
                    target: "platform::input",
                    "Poll buffers saturated after {} notifications, deferring rest",
                    consumed
                );
                break;
            }
        }

        self.motion_origin = None;
        consumed
    }

    /// Translates one notification.
    pub fn handle<P>(
        &mut self,
        raw: RawInput,
        queue: &mut EventQueue,
        polls: &mut PollBuffers,
        pointer: &mut P,
    ) -> PumpStatus
    where
        P: PointerHost + ?Sized,
    {
        match raw {
            RawInput::KeyDown { key, unicode } => {
                let translated = translate_key(key, unicode, true);

                if translated.key != K_NONE {
                    queue.enqueue(SysEvent::key(translated.key, true));
                }
                if let Some(ch) = translated.character {
                    queue.enqueue(SysEvent::char(ch));
                }

                PumpStatus::from_accepted(polls.add_keyboard_event(translated.key, true))
            }

            RawInput::KeyUp { key } => {
                let translated = translate_key(key, 0, false);

                if translated.key != K_NONE {
                    queue.enqueue(SysEvent::key(translated.key, false));
                }

                PumpStatus::from_accepted(polls.add_keyboard_event(translated.key, false))
            }

            RawInput::Motion { x, y } => {
                self.handle_motion(x, y, queue, polls, pointer);
                PumpStatus::Continue
            }

            RawInput::ButtonDown(ordinal) => Self::handle_button(ordinal, true, queue, polls),

            RawInput::ButtonUp(ordinal) => Self::handle_button(ordinal, false, queue, polls),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn handle_motion<P>(
        &mut self,
        x: i32,
        y: i32,
        queue: &mut EventQueue,
        polls: &mut PollBuffers,
        pointer: &mut P,
    ) where
        P: PointerHost + ?Sized,
    {
        if !self.grabbed {
            return;
        }

        let (width, height) = pointer.viewport_size();
        let (mid_x, mid_y) = (width / 2, height / 2);

        if (x, y) == (mid_x, mid_y) {
            trace!(target: "platform::input", "Ignoring re-centre feedback at ({}, {})", x, y);
            self.motion_origin = None;
            return;
        }

        let (origin_x, origin_y) = self.motion_origin.unwrap_or((mid_x, mid_y));
        self.motion_origin = Some((x, y));

        let (dx, dy) = (x.saturating_sub(origin_x), y.saturating_sub(origin_y));
        if (dx, dy) == (0, 0) {
            return;
        }

        queue.enqueue(SysEvent::mouse(dx, dy));
        pointer.warp_pointer(mid_x, mid_y);

        // Motion never stops the pump; overflow past headroom is dropped.
        polls.add_mouse_event(MouseAction::DeltaX, dx);
        polls.add_mouse_event(MouseAction::DeltaY, dy);
    }

    fn handle_button(
        ordinal: u8,
        down: bool,
        queue: &mut EventQueue,
        polls: &mut PollBuffers,
    ) -> PumpStatus {
        match ordinal {
            WHEEL_UP | WHEEL_DOWN => {
                if !down {
                    return PumpStatus::Continue;
                }
                let (key, detent) = if ordinal == WHEEL_UP {
                    (K_MWHEELUP, 1)
                } else {
                    (K_MWHEELDOWN, -1)
                };
                queue.enqueue(SysEvent::key(key, true));
                PumpStatus::from_accepted(polls.add_mouse_event(MouseAction::DeltaZ, detent))
            }

            _ => match button_index(ordinal) {
                Some(index) => {
                    queue.enqueue(SysEvent::key(K_MOUSE1 + KeyNum::from(index), down));
                    PumpStatus::from_accepted(
                        polls.add_mouse_event(MouseAction::Button(index), i32::from(down)),
                    )
                }
                None => {
                    debug!(
                        target: "platform::input",
                        "Button {} {} not supported",
                        if down { "press" } else { "release" },
                        ordinal
                    );
                    PumpStatus::Continue
                }
            },
        }
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(true)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
