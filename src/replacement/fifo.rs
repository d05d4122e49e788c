//! FIFO (First-In, First-Out) replacement policy.
//!
//! Keeps slots in the order their current pages were loaded. The front of the queue
//! is the eviction candidate and hits leave the order untouched.
//!
//! # Complexity
//!
//! - Hit: O(1)
//! - Eviction: O(1)

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// FIFO policy state: slot indices ordered by load time, oldest first.
#[derive(Debug)]
pub struct PolicyState {
    load_order: VecDeque<usize>,
}

impl PolicyState {
    pub fn new(frame_count: usize) -> Self {
        Self {
            load_order: VecDeque::with_capacity(frame_count),
        }
    }
}

impl ReplacementPolicy for PolicyState {
    fn record_hit(&mut self, _slot: usize, _page: i64, _index: usize) {}

    fn on_frame_assigned(&mut self, slot: usize, _page: i64, _index: usize) {
        self.load_order.push_back(slot);
    }

    fn evict_frame(&mut self, _frames: &[Option<i64>]) -> Option<usize> {
        self.load_order.pop_front()
    }
}

#[cfg(test)]
mod fifo_tests {
    use super::PolicyState;
    use crate::replacement::ReplacementPolicy;

    #[test]
    fn evicts_in_load_order_regardless_of_hits() {
        let mut policy = PolicyState::new(3);
        let frames = [Some(10), Some(11), Some(12)];
        policy.on_frame_assigned(0, 10, 0);
        policy.on_frame_assigned(1, 11, 1);
        policy.on_frame_assigned(2, 12, 2);
        policy.record_hit(0, 10, 3);

        assert_eq!(policy.evict_frame(&frames), Some(0));
        policy.on_frame_assigned(0, 13, 4);
        assert_eq!(policy.evict_frame(&frames), Some(1));
        assert_eq!(policy.evict_frame(&frames), Some(2));
        assert_eq!(policy.evict_frame(&frames), Some(0));
    }
}
