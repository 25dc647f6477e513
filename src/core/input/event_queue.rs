//=========================================================================
// Event Queue
//
// Fixed-capacity ring buffer that serializes platform input callbacks into
// one ordered stream, drained once per frame.
//
// Layout:
// ```text
//   slots: [ e0 | e1 | e2 | ... | eN-1 ]      N = capacity (power of two)
//            ^tail & mask    ^head & mask
//
//   head  next write index (monotonic)
//   tail  next read index  (monotonic)
//   len = head - tail, 0 <= len <= N
// ```
//
// Overflow policy: the queue never blocks and never refuses an event.
// When full, the oldest unread event is evicted (its payload released)
// and a diagnostic is logged. Under sustained overload the queue holds
// the most recent N events.
//
// Concurrency: single writer, single reader, same thread. The platform
// pumps and drains it sequentially within a frame; all mutation goes
// through `&mut self`, so sharing across threads needs an outer lock.
// Cross-thread delivery happens after draining, on the platform bridge.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::event::SysEvent;

//=== Constants ===========================================================

/// Slot count used by [`EventQueue::new`].
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

//=== EventQueueError =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventQueueError {
    /// Capacity must be a non-zero power of two so masking replaces modulo.
    #[error("event queue capacity must be a non-zero power of two, got {0}")]
    InvalidCapacity(usize),
}

//=== EventQueue ==========================================================

/// Bounded FIFO of [`SysEvent`]s with drop-oldest overflow.
pub struct EventQueue {
    slots: Box<[SysEvent]>,
    mask: u64,
    head: u64,
    tail: u64,
    dropped: u64,
}

impl EventQueue {
    //--- Construction -----------------------------------------------------

    /// Creates an empty queue with [`DEFAULT_EVENT_QUEUE_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::allocate(DEFAULT_EVENT_QUEUE_CAPACITY)
    }

    /// Creates an empty queue with `capacity` slots.
    ///
    /// # Errors
    ///
    /// [`EventQueueError::InvalidCapacity`] if `capacity` is zero or not a
    /// power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self, EventQueueError> {
        if !capacity.is_power_of_two() {
            return Err(EventQueueError::InvalidCapacity(capacity));
        }
        Ok(Self::allocate(capacity))
    }

    fn allocate(capacity: usize) -> Self {
        let slots: Vec<SysEvent> = (0..capacity).map(|_| SysEvent::empty()).collect();

        Self {
            slots: slots.into_boxed_slice(),
            mask: capacity as u64 - 1,
            head: 0,
            tail: 0,
            dropped: 0,
        }
    }

    //--- Producer ---------------------------------------------------------

    /// Appends an event, evicting the oldest unread one if full.
    ///
    /// Takes ownership of the event and its payload. Never blocks.
    pub fn enqueue(&mut self, event: SysEvent) {
        if self.len() >= self.capacity() {
            let index = self.slot(self.tail);
            let evicted = std::mem::take(&mut self.slots[index]);
            self.tail += 1;
            self.dropped += 1;

            warn!(
                target: "input::queue",
                "Event queue overflow: dropped oldest {:?} event ({} total)",
                evicted.kind,
                self.dropped
            );
            // evicted payload released here
        }

        let index = self.slot(self.head);
        self.slots[index] = event;
        self.head += 1;
    }

    //--- Consumer ---------------------------------------------------------

    /// Removes and returns the oldest event.
    ///
    /// Returns the empty sentinel (`kind == None`) when nothing is pending;
    /// `tail` is left untouched in that case. Payload ownership moves to
    /// the caller.
    pub fn dequeue(&mut self) -> SysEvent {
        if self.head > self.tail {
            let index = self.slot(self.tail);
            self.tail += 1;
            std::mem::take(&mut self.slots[index])
        } else {
            SysEvent::empty()
        }
    }

    /// Dequeues every pending event in order.
    ///
    /// Events not consumed from the iterator stay in the queue.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { queue: self }
    }

    //--- Reset ------------------------------------------------------------

    /// Discards all pending events and resets both counters to zero.
    ///
    /// Pending payloads are released here rather than left in their slots.
    pub fn clear(&mut self) {
        let pending = self.len();

        while self.tail < self.head {
            let index = self.slot(self.tail);
            self.slots[index] = SysEvent::empty();
            self.tail += 1;
        }

        self.head = 0;
        self.tail = 0;

        if pending > 0 {
            debug!(target: "input::queue", "Cleared {} pending events", pending);
        }
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        (self.head - self.tail) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Next write index (monotonic until [`clear`](Self::clear)).
    pub fn head(&self) -> u64 {
        self.head
    }

    /// Next read index (monotonic until [`clear`](Self::clear)).
    pub fn tail(&self) -> u64 {
        self.tail
    }

    /// Number of events evicted by overflow since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn slot(&self, index: u64) -> usize {
        (index & self.mask) as usize
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn payloads_held(&self) -> usize {
        self.slots.iter().filter(|e| e.payload.is_some()).count()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("dropped", &self.dropped)
            .finish()
    }
}

//=== Drain ===============================================================

/// Iterator returned by [`EventQueue::drain`].
pub struct Drain<'a> {
    queue: &'a mut EventQueue,
}

impl Iterator for Drain<'_> {
    type Item = SysEvent;

    fn next(&mut self) -> Option<SysEvent> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.dequeue())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Drain<'_> {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::SysEventKind;
    use proptest::prelude::*;

    fn numbered(n: i32) -> SysEvent {
        SysEvent::mouse(n, -n)
    }

    fn values(queue: &mut EventQueue) -> Vec<i32> {
        queue.drain().map(|e| e.value).collect()
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn new_queue_is_empty_with_default_capacity() {
        let queue = EventQueue::new();
        assert_eq!(queue.capacity(), DEFAULT_EVENT_QUEUE_CAPACITY);
        assert!(queue.is_empty());
        assert_eq!((queue.head(), queue.tail()), (0, 0));
    }

    #[test]
    fn capacity_must_be_power_of_two() {
        assert_eq!(
            EventQueue::with_capacity(0).unwrap_err(),
            EventQueueError::InvalidCapacity(0)
        );
        assert_eq!(
            EventQueue::with_capacity(100).unwrap_err(),
            EventQueueError::InvalidCapacity(100)
        );
        assert_eq!(EventQueue::with_capacity(64).unwrap().capacity(), 64);
        assert_eq!(EventQueue::with_capacity(1).unwrap().capacity(), 1);
    }

    #[test]
    fn capacity_error_message_names_value() {
        let err = EventQueue::with_capacity(12).unwrap_err();
        assert!(err.to_string().contains("12"));
    }

    //=====================================================================
    // Ordering
    //=====================================================================

    #[test]
    fn dequeues_in_fifo_order() {
        let mut queue = EventQueue::with_capacity(8).unwrap();
        for n in 1..=8 {
            queue.enqueue(numbered(n));
        }

        assert_eq!(queue.len(), 8);
        for n in 1..=8 {
            assert_eq!(queue.dequeue().value, n);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn overflow_drops_exactly_the_oldest() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        for n in 1..=5 {
            queue.enqueue(numbered(n));
        }

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(values(&mut queue), vec![2, 3, 4, 5]);
    }

    #[test]
    fn sustained_overload_keeps_most_recent() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        for n in 0..1000 {
            queue.enqueue(numbered(n));
        }

        assert_eq!(queue.dropped(), 996);
        assert!(queue.head() - queue.tail() <= queue.capacity() as u64);
        assert_eq!(values(&mut queue), vec![996, 997, 998, 999]);
    }

    #[test]
    fn interleaved_use_wraps_around() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        for n in 0..3 {
            queue.enqueue(numbered(n));
        }

        for n in 3..53 {
            queue.enqueue(numbered(n));
            assert_eq!(queue.dequeue().value, n - 3);
        }

        assert_eq!(queue.dropped(), 0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.head(), 53);
        assert_eq!(values(&mut queue), vec![50, 51, 52]);
    }

    //=====================================================================
    // Empty Queue
    //=====================================================================

    #[test]
    fn empty_dequeue_returns_sentinel_without_moving_tail() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        queue.enqueue(numbered(1));
        queue.dequeue();

        let tail = queue.tail();
        let event = queue.dequeue();

        assert_eq!(event.kind, SysEventKind::None);
        assert!(event.is_empty());
        assert_eq!(queue.tail(), tail);
        assert_eq!(queue.tail(), queue.head());
    }

    #[test]
    fn drain_on_empty_yields_nothing() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn partial_drain_leaves_rest_queued() {
        let mut queue = EventQueue::with_capacity(8).unwrap();
        for n in 0..5 {
            queue.enqueue(numbered(n));
        }

        let first_two: Vec<_> = queue.drain().take(2).map(|e| e.value).collect();
        assert_eq!(first_two, vec![0, 1]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn drain_reports_exact_size() {
        let mut queue = EventQueue::with_capacity(8).unwrap();
        queue.enqueue(numbered(1));
        queue.enqueue(numbered(2));
        assert_eq!(queue.drain().len(), 2);
    }

    //=====================================================================
    // Payload Ownership
    //=====================================================================

    #[test]
    fn dequeue_transfers_payload_to_caller() {
        let mut queue = EventQueue::with_capacity(2).unwrap();
        queue.enqueue(SysEvent::char(b'x').with_payload(vec![9u8, 8, 7]));

        let mut event = queue.dequeue();
        assert_eq!(queue.payloads_held(), 0);
        let payload = event.take_payload().expect("payload travels with event");
        assert_eq!(payload.into_bytes().as_ref(), &[9, 8, 7]);
    }

    #[test]
    fn overflow_releases_evicted_payload() {
        let mut queue = EventQueue::with_capacity(2).unwrap();
        queue.enqueue(numbered(1).with_payload(vec![1u8]));
        queue.enqueue(numbered(2));
        assert_eq!(queue.payloads_held(), 1);

        queue.enqueue(numbered(3));

        assert_eq!(queue.payloads_held(), 0);
        assert_eq!(values(&mut queue), vec![2, 3]);
    }

    //=====================================================================
    // Clear
    //=====================================================================

    #[test]
    fn clear_on_empty_queue_is_noop() {
        let mut queue = EventQueue::new();
        assert_eq!((queue.head(), queue.tail()), (0, 0));
        queue.clear();
        assert_eq!((queue.head(), queue.tail()), (0, 0));
        queue.clear();
        assert_eq!((queue.head(), queue.tail()), (0, 0));
    }

    #[test]
    fn clear_resets_counters_and_discards_pending() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        for n in 0..3 {
            queue.enqueue(numbered(n));
        }
        queue.dequeue();

        queue.clear();

        assert_eq!((queue.head(), queue.tail()), (0, 0));
        assert!(queue.dequeue().is_empty());
    }

    // Resetting the counters alone would leave these buffers parked in
    // their slots until overwritten; clear() releases them immediately.
    #[test]
    fn clear_releases_pending_payloads() {
        let mut queue = EventQueue::with_capacity(4).unwrap();
        queue.enqueue(numbered(1).with_payload(vec![1u8; 16]));
        queue.enqueue(numbered(2).with_payload(vec![2u8; 16]));
        assert_eq!(queue.payloads_held(), 2);

        queue.clear();

        assert_eq!(queue.payloads_held(), 0);
    }

    #[test]
    fn queue_is_reusable_after_clear() {
        let mut queue = EventQueue::with_capacity(2).unwrap();
        queue.enqueue(numbered(1));
        queue.enqueue(numbered(2));
        queue.clear();

        queue.enqueue(numbered(3));
        assert_eq!(values(&mut queue), vec![3]);
        assert_eq!(queue.dropped(), 0);
    }

    //=====================================================================
    // Properties
    //=====================================================================

    proptest! {
        #[test]
        fn prop_fifo_within_capacity(input in proptest::collection::vec(any::<i32>(), 0..=16)) {
            let mut queue = EventQueue::with_capacity(16).unwrap();
            for &v in &input {
                queue.enqueue(SysEvent::mouse(v, 0));
            }
            prop_assert_eq!(values(&mut queue), input);
        }

        #[test]
        fn prop_overflow_keeps_newest(input in proptest::collection::vec(any::<i32>(), 0..64)) {
            let mut queue = EventQueue::with_capacity(8).unwrap();
            for &v in &input {
                queue.enqueue(SysEvent::mouse(v, 0));
                prop_assert!(queue.tail() <= queue.head());
                prop_assert!(queue.len() <= queue.capacity());
            }

            let keep = input.len().min(8);
            let expected = input[input.len() - keep..].to_vec();
            prop_assert_eq!(queue.dropped() as usize, input.len() - keep);
            prop_assert_eq!(values(&mut queue), expected);
        }
    }
}
