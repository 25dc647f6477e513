//=========================================================================
// Input System
//
// Engine-side input: the event vocabulary, the event queue and translator
// used by the platform layer, and the `InputSystem` that applies drained
// events to the simulation's input state once per tick.
//
// Flow:
// ```text
//   RawInput ─> InputTranslator ─> EventQueue ─drain─> InputFrame
//                                                         │
//                                  (core thread) InputSystem::update
// ```
//
// Notes:
// `InputSystem` is owned and updated by the CoreSystemsOrchestrator.
// Payloads of the tick's events stay alive until the next update unless
// taken with `take_events()`.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
pub mod event_queue;
pub mod keys;
pub mod poll_buffer;
pub mod translator;
mod input_state;

//=== Public Re-exports ===================================================
pub use event::{EventPayload, SysEvent, SysEventKind};
pub use event_queue::{EventQueue, EventQueueError, DEFAULT_EVENT_QUEUE_CAPACITY};
pub use keys::KeyNum;
pub use poll_buffer::{KeyboardPoll, MouseAction, MousePoll, PollBuffers, PollSnapshot};
pub use translator::{InputSource, InputTranslator, PointerHost, RawInput};

//=== Internal Imports ====================================================
use input_state::InputState;

//=== External Crates =====================================================
use log::debug;

//=== InputFrame ==========================================================

/// Everything the platform drained during one frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Queue contents in FIFO order.
    pub events: Vec<SysEvent>,

    /// Raw poll samples recorded during the frame.
    pub polls: PollSnapshot,

    /// Held keys must be released before applying `events`.
    pub reset: bool,
}

impl InputFrame {
    pub fn new(events: Vec<SysEvent>, polls: PollSnapshot) -> Self {
        Self {
            events,
            polls,
            reset: false,
        }
    }

    /// A frame that only releases held keys (focus loss).
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.polls.is_empty() && !self.reset
    }
}

//=== InputSystem =========================================================

/// Owns the simulation's input state and answers queries about it.
pub struct InputSystem {
    input_state: InputState,
    events: Vec<SysEvent>,
    polls: PollSnapshot,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        Self {
            input_state: InputState::new(),
            events: Vec::new(),
            polls: PollSnapshot::default(),
        }
    }

    //--- update() ---------------------------------------------------------
    //
    // Consumes every frame received this tick, oldest first, and applies
    // its events in queue order.
    //
    pub fn update(&mut self, frames: &mut Vec<InputFrame>) {
        self.input_state.begin_tick();
        self.events.clear();
        self.polls.keyboard.clear();
        self.polls.mouse.clear();

        for frame in frames.drain(..) {
            if frame.reset {
                self.input_state.release_all();
            }
            self.input_state.apply_events(&frame.events);
            self.events.extend(frame.events);
            self.polls.keyboard.extend(frame.polls.keyboard);
            self.polls.mouse.extend(frame.polls.mouse);
        }

        if self.input_state.has_changed {
            debug!(target: "input", "Input updated: {:?}", self.input_state);
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: KeyNum) -> bool {
        self.input_state.keys_down.contains(&key)
    }

    /// Relative mouse motion accumulated this tick.
    pub fn mouse_delta(&self) -> (i32, i32) {
        self.input_state.mouse_delta
    }

    /// Last absolute pointer position reported.
    pub fn mouse_position(&self) -> (i32, i32) {
        self.input_state.mouse_position
    }

    /// Net wheel detents since startup.
    pub fn wheel(&self) -> i32 {
        self.input_state.wheel
    }

    /// Characters typed this tick.
    pub fn typed_text(&self) -> &str {
        &self.input_state.typed
    }

    /// Events applied this tick, in order.
    pub fn events(&self) -> &[SysEvent] {
        &self.events
    }

    /// Takes ownership of this tick's events (and their payloads).
    pub fn take_events(&mut self) -> Vec<SysEvent> {
        std::mem::take(&mut self.events)
    }

    /// Raw poll samples recorded this tick.
    pub fn polls(&self) -> &PollSnapshot {
        &self.polls
    }

    /// Whether the last update changed anything.
    pub fn has_changed(&self) -> bool {
        self.input_state.has_changed
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use keys::{K_MOUSE1, K_MWHEELUP};

    fn frame(events: Vec<SysEvent>) -> InputFrame {
        InputFrame::new(events, PollSnapshot::default())
    }

    #[test]
    fn key_press_and_release_updates_state() {
        let mut system = InputSystem::new();

        system.update(&mut vec![frame(vec![SysEvent::key(97, true)])]);
        assert!(system.has_changed());
        assert!(system.is_key_down(97));

        system.update(&mut vec![frame(vec![SysEvent::key(97, false)])]);
        assert!(system.has_changed());
        assert!(!system.is_key_down(97));
    }

    #[test]
    fn frames_apply_in_arrival_order() {
        let mut system = InputSystem::new();
        let mut frames = vec![
            frame(vec![SysEvent::key(K_MOUSE1, true)]),
            frame(vec![SysEvent::key(K_MOUSE1, false)]),
        ];

        system.update(&mut frames);

        assert!(frames.is_empty(), "frames are consumed");
        assert!(!system.is_key_down(K_MOUSE1));
        assert_eq!(system.events().len(), 2);
    }

    #[test]
    fn mouse_delta_resets_between_ticks() {
        let mut system = InputSystem::new();
        system.update(&mut vec![frame(vec![SysEvent::mouse(5, 0), SysEvent::mouse(1, 2)])]);
        assert_eq!(system.mouse_delta(), (6, 2));

        system.update(&mut Vec::new());
        assert_eq!(system.mouse_delta(), (0, 0));
        assert!(!system.has_changed());
    }

    #[test]
    fn wheel_persists_across_ticks() {
        let mut system = InputSystem::new();
        system.update(&mut vec![frame(vec![SysEvent::key(K_MWHEELUP, true)])]);
        system.update(&mut vec![frame(vec![SysEvent::key(K_MWHEELUP, true)])]);
        assert_eq!(system.wheel(), 2);
        assert!(!system.is_key_down(K_MWHEELUP));
    }

    #[test]
    fn reset_frame_releases_held_keys_before_its_events() {
        let mut system = InputSystem::new();
        system.update(&mut vec![frame(vec![SysEvent::key(119, true)])]);

        let mut reset = InputFrame::reset();
        reset.events.push(SysEvent::key(115, true));
        system.update(&mut vec![reset]);

        assert!(!system.is_key_down(119));
        assert!(system.is_key_down(115));
    }

    #[test]
    fn polls_are_collected_per_tick() {
        let mut system = InputSystem::new();
        let polls = PollSnapshot {
            keyboard: vec![KeyboardPoll { key: 97, down: true }],
            mouse: vec![MousePoll { action: MouseAction::DeltaX, value: 3 }],
        };
        system.update(&mut vec![InputFrame::new(Vec::new(), polls.clone())]);
        assert_eq!(system.polls(), &polls);

        system.update(&mut Vec::new());
        assert!(system.polls().is_empty());
    }

    #[test]
    fn take_events_hands_over_payloads() {
        let mut system = InputSystem::new();
        let event = SysEvent::char(b'x').with_payload(vec![1u8, 2]);
        system.update(&mut vec![frame(vec![event])]);

        let mut events = system.take_events();
        assert_eq!(system.events().len(), 0);
        assert_eq!(events[0].take_payload().map(|p| p.len()), Some(2));
        assert_eq!(system.typed_text(), "x");
    }

    #[test]
    fn empty_frame_detection() {
        assert!(InputFrame::default().is_empty());
        assert!(!InputFrame::reset().is_empty());
        assert!(!frame(vec![SysEvent::mouse(1, 1)]).is_empty());
    }
}
