//=========================================================================
// Input Buffer
//
// Holds raw notifications received from winit between frame boundaries.
// winit pushes callbacks at us whenever it likes; the translator wants a
// source it can poll once per frame. This buffer is that source.
//
// Responsibilities:
// - Store incoming notifications in arrival order
// - Serve them to the translator through `InputSource::poll`
// - Keep whatever the translator left unread for the next frame
//
// Notes:
// Nothing is deduplicated or coalesced here: every motion sample matters
// for re-centre feedback detection, and every key transition matters for
// held-key state.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::VecDeque;

//=== Internal Modules ====================================================
use crate::core::input::{InputSource, RawInput};

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    pending: VecDeque<RawInput>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocated for a busy frame of mouse motion plus a few keys.
    //
    pub(crate) fn new() -> Self {
        const PENDING_BASE: usize = 128;

        Self {
            pending: VecDeque::with_capacity(PENDING_BASE),
        }
    }

    pub(crate) fn push(&mut self, input: RawInput) {
        self.pending.push_back(input);
    }

    pub(crate) fn extend(&mut self, inputs: impl IntoIterator<Item = RawInput>) {
        self.pending.extend(inputs);
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for InputBuffer {
    fn poll(&mut self) -> Option<RawInput> {
        self.pending.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: i32) -> RawInput {
        RawInput::KeyDown { key, unicode: 0 }
    }

    #[test]
    fn polls_in_arrival_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(1));
        buffer.push(RawInput::Motion { x: 3, y: 4 });
        buffer.push(key_down(2));

        assert_eq!(buffer.poll(), Some(key_down(1)));
        assert_eq!(buffer.poll(), Some(RawInput::Motion { x: 3, y: 4 }));
        assert_eq!(buffer.poll(), Some(key_down(2)));
        assert_eq!(buffer.poll(), None);
    }

    #[test]
    fn repeated_inputs_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.extend([RawInput::ButtonDown(4), RawInput::ButtonDown(4)]);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn clear_behavior() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(1));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.poll(), None);
    }

    //--- Memory Retention -------------------------------------------------
    //
    // `clear()` keeps the allocation for reuse across frames.
    //
    #[test]
    fn clear_does_not_deallocate() {
        let mut buffer = InputBuffer::new();
        for n in 0..512 {
            buffer.push(RawInput::Motion { x: n, y: n });
        }

        let cap_before = buffer.pending.capacity();
        buffer.clear();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.pending.capacity(), cap_before);
    }
}
