use std::collections::VecDeque;

use super::types::InputEvent;

/// Bounded FIFO of input events awaiting dispatch.
///
/// The runtime pushes translated platform events as they arrive and drains the
/// queue once per frame, before rendering. When full, incoming events are
/// dropped rather than evicting older ones, so the applied order always
/// matches arrival order.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a queue holding at most `capacity` events (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an event. Returns `false` if the queue was full and the event was dropped.
    pub fn push(&mut self, ev: InputEvent) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            log::warn!(
                "input queue full ({} events); dropping {:?}",
                self.capacity,
                ev
            );
            return false;
        }
        self.events.push_back(ev);
        true
    }

    /// Removes and yields all queued events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of events dropped because the queue was full.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn drains_in_arrival_order() {
        let mut q = EventQueue::new();
        q.push(InputEvent::key_pressed(Key::W));
        q.push(InputEvent::key_released(Key::W));
        q.push(InputEvent::key_pressed(Key::E));

        let got: Vec<_> = q.drain().collect();
        assert_eq!(
            got,
            vec![
                InputEvent::key_pressed(Key::W),
                InputEvent::key_released(Key::W),
                InputEvent::key_pressed(Key::E),
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_newest() {
        let mut q = EventQueue::with_capacity(2);
        assert!(q.push(InputEvent::key_pressed(Key::Q)));
        assert!(q.push(InputEvent::key_pressed(Key::W)));
        assert!(!q.push(InputEvent::key_pressed(Key::E)));

        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 1);

        let last = q.drain().last();
        assert_eq!(last, Some(InputEvent::key_pressed(Key::W)));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut q = EventQueue::with_capacity(0);
        assert_eq!(q.capacity(), 1);
        assert!(q.push(InputEvent::key_pressed(Key::Escape)));
    }

    #[test]
    fn drain_leaves_queue_reusable() {
        let mut q = EventQueue::with_capacity(1);
        q.push(InputEvent::key_pressed(Key::Q));
        assert_eq!(q.drain().count(), 1);
        assert!(q.push(InputEvent::key_pressed(Key::W)));
    }
}
