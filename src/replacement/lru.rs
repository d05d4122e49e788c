//! LRU (Least Recently Used) replacement policy.
//!
//! Tracks the index of the most recent reference to each resident page. The page
//! that loaded a frame counts as referenced at that index.
//!
//! # Algorithm
//!
//! - On hit: update the page's last reference index
//! - On allocation: record the loading reference as the last reference
//! - On eviction: pick the smallest last reference index, lowest slot on ties
//!
//! # Complexity
//!
//! - Hit: O(1)
//! - Eviction: O(frame_count)

use std::collections::HashMap;

use super::ReplacementPolicy;

#[derive(Debug)]
pub struct PolicyState {
    last_reference: HashMap<i64, usize>,
}

impl PolicyState {
    pub fn new(frame_count: usize) -> Self {
        Self {
            last_reference: HashMap::with_capacity(frame_count),
        }
    }
}

impl ReplacementPolicy for PolicyState {
    fn record_hit(&mut self, _slot: usize, page: i64, index: usize) {
        self.last_reference.insert(page, index);
    }

    fn on_frame_assigned(&mut self, _slot: usize, page: i64, index: usize) {
        self.last_reference.insert(page, index);
    }

    fn evict_frame(&mut self, frames: &[Option<i64>]) -> Option<usize> {
        let (slot, page) = frames
            .iter()
            .enumerate()
            .filter_map(|(slot, page)| page.map(|page| (slot, page)))
            .min_by_key(|(slot, page)| {
                let last = self.last_reference.get(page).copied().unwrap_or_default();
                (last, *slot)
            })?;
        self.last_reference.remove(&page);
        Some(slot)
    }
}

#[cfg(test)]
mod lru_tests {
    use super::PolicyState;
    use crate::replacement::ReplacementPolicy;

    #[test]
    fn evicts_least_recently_referenced_page() {
        let mut policy = PolicyState::new(3);
        let frames = [Some(7), Some(0), Some(1)];
        policy.on_frame_assigned(0, 7, 0);
        policy.on_frame_assigned(1, 0, 1);
        policy.on_frame_assigned(2, 1, 2);
        policy.record_hit(0, 7, 3);

        assert_eq!(policy.evict_frame(&frames), Some(1));
        assert!(!policy.last_reference.contains_key(&0));
    }

    #[test]
    fn ties_fall_to_the_lowest_slot() {
        let mut policy = PolicyState::new(2);
        policy.last_reference.insert(4, 5);
        policy.last_reference.insert(8, 5);
        assert_eq!(policy.evict_frame(&[Some(8), Some(4)]), Some(0));
    }

    #[test]
    fn empty_frames_have_no_victim() {
        let mut policy = PolicyState::new(2);
        assert_eq!(policy.evict_frame(&[None, None]), None);
    }
}
