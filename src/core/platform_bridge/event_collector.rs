//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side receiver for platform frames with bounded polling and
// shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input frames → InputSystem
//
// Focus loss is turned into a reset frame so held keys are released at
// the right point in the frame sequence.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputFrame;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frames: Vec<InputFrame>,
}

impl EventCollector {
    const MAX_EVENTS_PER_TICK: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frames: Vec::with_capacity(4),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Frames not taken since the previous call are kept and appended to.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_TICK {
            warn!(target: "core", "Platform backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    /// Frames collected so far.
    pub(crate) fn frames(&self) -> &[InputFrame] {
        &self.frames
    }

    /// Mutable access for handing frames to the input system.
    pub(crate) fn frames_mut(&mut self) -> &mut Vec<InputFrame> {
        &mut self.frames
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Frame(frame) => {
                if !frame.is_empty() {
                    self.frames.push(frame);
                }
                TickControl::Continue
            }
            PlatformEvent::FocusChanged(focused) => {
                trace!(target: "core", "Focus changed: {}", focused);
                if !focused {
                    self.frames.push(InputFrame::reset());
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{PollSnapshot, SysEvent};
    use crossbeam_channel::unbounded;

    fn key_frame(key: i32) -> PlatformEvent {
        PlatformEvent::Frame(InputFrame::new(
            vec![SysEvent::key(key, true)],
            PollSnapshot::default(),
        ))
    }

    #[test]
    fn collect_handles_empty_channel() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.frames().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_frames() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_frame(97)).unwrap();
        tx.send(key_frame(98)).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.frames().len(), 2);
        assert_eq!(collector.frames()[1].events[0].value, 98);
    }

    #[test]
    fn empty_frames_are_skipped() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Frame(InputFrame::default())).unwrap();
        collector.collect_frame();

        assert!(collector.frames().is_empty());
    }

    #[test]
    fn focus_loss_becomes_reset_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_frame(97)).unwrap();
        tx.send(PlatformEvent::FocusChanged(false)).unwrap();
        tx.send(PlatformEvent::FocusChanged(true)).unwrap();
        collector.collect_frame();

        assert_eq!(collector.frames().len(), 2);
        assert!(collector.frames()[1].reset);
    }

    #[test]
    fn taken_frames_do_not_reappear() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_frame(32)).unwrap();
        collector.collect_frame();
        assert_eq!(collector.frames_mut().drain(..).count(), 1);

        collector.collect_frame();
        assert!(collector.frames().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_is_bounded_per_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..(EventCollector::MAX_EVENTS_PER_TICK + 5) {
            tx.send(key_frame(1)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.frames().len(), EventCollector::MAX_EVENTS_PER_TICK);

        collector.collect_frame();
        assert_eq!(
            collector.frames().len(),
            EventCollector::MAX_EVENTS_PER_TICK + 5,
            "remaining events arrive next tick"
        );
    }
}
