//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                          Logic Thread:
//  ┌───────────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop             │    │  Core Systems    │
//  │   ↓                           │    │                  │
//  │  event_mapper (RawInput)      │    │  InputSystem     │
//  │   ↓                           │    │  ↓               │
//  │  InputBuffer (pending)        │    │  on_tick()       │
//  │   ↓                           │    │                  │
//  │  RedrawRequested              │    └──────────────────┘
//  │   ↓ InputTranslator::pump     │             ↑
//  │  EventQueue + PollBuffers     │             │
//  │   ↓ drain                     │             │
//  │  Channel ─────────────────────┼─────────────┘
//  └───────────────────────────────┘    PlatformEvent::Frame
//
//  Frame Boundary: RedrawRequested
//    → Pending input translated, queue drained in FIFO order
//    → Core processes at fixed TPS (independent of refresh rate)
//    → Empty frames NOT sent
// ```
//
// Responsibilities:
// - Create and manage the OS window and pointer grab
// - Convert winit types into `RawInput`
// - Own the event queue, poll buffers and translator
// - Send one drained frame per redraw to the core thread
//
// Notes:
// Sending never blocks the event loop. Messages the channel cannot accept
// wait in a backlog, in order, and go out ahead of anything newer;
// consecutive held frames merge into one. A close request still stuck in
// the backlog at exit is covered by the channel disconnecting.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_buffer;
mod pointer;

//=== Standard Library Imports ============================================

use std::collections::VecDeque;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::{EventQueue, InputFrame, InputTranslator, PollBuffers, RawInput};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use pointer::{apply_grab, WindowPointer};

//=== WindowSettings ======================================================

/// Window and grab configuration handed over by the engine builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) grab_input: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Neo Platform".to_string(),
            width: 800,
            height: 600,
            grab_input: true,
        }
    }
}

//=== Platform ============================================================

/// Window manager, input translator and queue owner.
///
/// Runs on the main thread (winit requirement on macOS/iOS) and sends
/// drained frames to the core thread. Not `Send`: the window stays here.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    settings: WindowSettings,

    /// Notifications received since the last frame boundary.
    pending: InputBuffer,

    queue: EventQueue,
    polls: PollBuffers,
    translator: InputTranslator,

    /// Messages the channel had no room for, oldest first.
    backlog: VecDeque<PlatformEvent>,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        queue: EventQueue,
        settings: WindowSettings,
    ) -> Self {
        info!(
            target: "platform",
            "Platform subsystem initialized (queue capacity: {})",
            queue.capacity()
        );

        Self {
            window: None,
            translator: InputTranslator::new(settings.grab_input),
            settings,
            pending: InputBuffer::new(),
            queue,
            polls: PollBuffers::new(),
            backlog: VecDeque::new(),
            event_sender,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Frame Boundary ---------------------------------------------------

    /// Translates pending input and ships the frame.
    fn end_frame(&mut self) {
        if let Some(window) = &self.window {
            let mut pointer = WindowPointer::new(window);
            self.translator
                .pump(&mut self.pending, &mut self.queue, &mut self.polls, &mut pointer);
        } else if !self.pending.is_empty() {
            trace!(
                target: "platform::input",
                "No window yet, {} notifications pending",
                self.pending.len()
            );
        }

        self.flush_frame();
    }

    /// Drains the queue and poll buffers into one frame for the core thread.
    fn flush_frame(&mut self) {
        let events = self.queue.drain().collect();
        let polls = self.polls.take();
        let fresh = InputFrame::new(events, polls);

        if fresh.is_empty() {
            self.deliver_backlog();
            return;
        }

        trace!(
            target: "platform::input",
            "Flushing {} events, {} key polls, {} mouse polls",
            fresh.events.len(),
            fresh.polls.keyboard.len(),
            fresh.polls.mouse.len()
        );

        self.send(PlatformEvent::Frame(fresh));
    }

    //--- Delivery ---------------------------------------------------------

    /// Queues `event` behind anything held and sends what the channel
    /// accepts. Never blocks.
    fn send(&mut self, event: PlatformEvent) {
        let unmerged = match (self.backlog.back_mut(), event) {
            (Some(PlatformEvent::Frame(held)), PlatformEvent::Frame(frame)) => {
                held.events.extend(frame.events);
                held.polls.keyboard.extend(frame.polls.keyboard);
                held.polls.mouse.extend(frame.polls.mouse);
                None
            }
            (_, event) => Some(event),
        };

        if let Some(event) = unmerged {
            self.backlog.push_back(event);
        }

        self.deliver_backlog();
    }

    fn deliver_backlog(&mut self) {
        while let Some(event) = self.backlog.pop_front() {
            match self.event_sender.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    debug!(
                        target: "platform",
                        "Channel full, holding {} messages",
                        self.backlog.len() + 1
                    );
                    self.backlog.push_front(event);
                    break;
                }
                Err(TrySendError::Disconnected(event)) => {
                    warn!(
                        target: "platform",
                        "Channel disconnected, dropping {:?} and {} held messages",
                        event,
                        self.backlog.len()
                    );
                    self.backlog.clear();
                    break;
                }
            }
        }
    }

    //--- Focus ------------------------------------------------------------

    /// Focus loss discards everything not yet delivered and releases the
    /// pointer; focus gain re-grabs when configured.
    fn focus_changed(&mut self, focused: bool) {
        if focused {
            if self.settings.grab_input {
                self.set_grab(true);
            }
        } else {
            self.queue.clear();
            self.pending.clear();
            self.polls.clear();
            self.backlog
                .retain(|event| !matches!(event, PlatformEvent::Frame(_)));
            self.set_grab(false);
        }

        info!(target: "platform", "Window focus {}", if focused { "gained" } else { "lost" });

        self.send(PlatformEvent::FocusChanged(focused));
    }

    fn set_grab(&mut self, grabbed: bool) {
        self.translator.set_grab(grabbed);
        if let Some(window) = &self.window {
            apply_grab(window, grabbed);
        }
    }

    //--- Input ------------------------------------------------------------

    fn push_input(&mut self, input: RawInput) {
        self.pending.push(input);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);

                if self.settings.grab_input {
                    self.set_grab(true);
                }
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => self.focus_changed(focused),

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match event_mapper::key_input(
                    key_event.physical_key,
                    key_event.state,
                    key_event.text.as_deref(),
                ) {
                    Some(input) => self.push_input(input),
                    None => debug!(
                        target: "platform::input",
                        "Unmapped key ignored: {:?}",
                        key_event.physical_key
                    ),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.push_input(RawInput::Motion {
                    x: position.x as i32,
                    y: position.y as i32,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.push_input(event_mapper::button_input(button, state));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.pending.extend(event_mapper::wheel_inputs(delta));
            }

            WindowEvent::RedrawRequested => {
                self.end_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyboardPoll, SysEvent};
    use crossbeam_channel::{bounded, unbounded};

    fn platform(sender: Sender<PlatformEvent>) -> Platform {
        Platform::new(sender, EventQueue::new(), WindowSettings::default())
    }

    fn expect_frame(event: Option<PlatformEvent>) -> InputFrame {
        match event {
            Some(PlatformEvent::Frame(frame)) => frame,
            other => panic!("Expected Frame event, got {:?}", other),
        }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = platform(tx);
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(platform.translator.is_grabbed());
    }

    #[test]
    fn grab_follows_settings() {
        let (tx, _rx) = unbounded();
        let settings = WindowSettings {
            grab_input: false,
            ..WindowSettings::default()
        };
        let platform = Platform::new(tx, EventQueue::new(), settings);
        assert!(!platform.translator.is_grabbed());
    }

    #[test]
    fn flush_empty_frame_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.flush_frame();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty frame");
    }

    #[test]
    fn flush_sends_queue_in_fifo_order() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(97, true));
        platform.queue.enqueue(SysEvent::char(b'a'));
        platform.polls.add_keyboard_event(97, true);

        platform.flush_frame();

        let frame = expect_frame(rx.try_recv().ok());
        assert_eq!(frame.events, vec![SysEvent::key(97, true), SysEvent::char(b'a')]);
        assert_eq!(frame.polls.keyboard, vec![KeyboardPoll { key: 97, down: true }]);
        assert!(platform.queue.is_empty());
    }

    #[test]
    fn end_frame_without_window_leaves_pending_input() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.push_input(RawInput::KeyDown { key: 97, unicode: 97 });
        platform.end_frame();

        assert!(rx.try_recv().is_err());
        assert_eq!(platform.pending.len(), 1);
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(32, true));
        drop(rx);

        platform.flush_frame();
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn full_channel_holds_frame_and_merges() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(1, true));
        platform.flush_frame();
        platform.queue.enqueue(SysEvent::key(2, true));
        platform.flush_frame();
        assert_eq!(platform.backlog.len(), 1);

        let first = expect_frame(rx.try_recv().ok());
        assert_eq!(first.events, vec![SysEvent::key(1, true)]);

        platform.queue.enqueue(SysEvent::key(3, true));
        platform.flush_frame();

        let merged = expect_frame(rx.try_recv().ok());
        assert_eq!(merged.events, vec![SysEvent::key(2, true), SysEvent::key(3, true)]);
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn control_messages_wait_behind_held_frames_without_blocking() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(1, true));
        platform.flush_frame();
        platform.queue.enqueue(SysEvent::key(2, true));
        platform.flush_frame();

        platform.send(PlatformEvent::WindowClosed);
        assert_eq!(platform.backlog.len(), 2);

        expect_frame(rx.try_recv().ok());
        platform.flush_frame();
        let held = expect_frame(rx.try_recv().ok());
        assert_eq!(held.events, vec![SysEvent::key(2, true)]);

        platform.flush_frame();
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::WindowClosed)));
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn focus_change_on_full_channel_is_held() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(1, true));
        platform.flush_frame();
        platform.queue.enqueue(SysEvent::key(2, true));
        platform.flush_frame();

        platform.focus_changed(false);
        assert_eq!(platform.backlog.len(), 1, "held frame discarded, focus kept");

        expect_frame(rx.try_recv().ok());
        platform.flush_frame();
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::FocusChanged(false))));
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(97, true));

        platform.flush_frame();
        platform.flush_frame();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn focus_loss_discards_undelivered_input() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.queue.enqueue(SysEvent::key(97, true));
        platform.polls.add_keyboard_event(97, true);
        platform.push_input(RawInput::Motion { x: 1, y: 1 });

        platform.focus_changed(false);

        assert!(platform.queue.is_empty());
        assert!(platform.pending.is_empty());
        assert!(platform.polls.keyboard().is_empty());
        assert!(!platform.translator.is_grabbed());
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::FocusChanged(false))));

        platform.flush_frame();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn focus_gain_regrabs_when_configured() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.focus_changed(false);
        platform.focus_changed(true);

        assert!(platform.translator.is_grabbed());
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::FocusChanged(false))));
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::FocusChanged(true))));
    }
}
