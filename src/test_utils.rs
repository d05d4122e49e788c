use std::collections::VecDeque;

use crate::replacement::{Algorithm, Outcome};

/// Textbook reference string used across the replacement tests.
pub const CLASSIC_REFERENCES: [i64; 8] = [7, 0, 1, 2, 0, 3, 0, 4];

/// Recomputes hit/fault labels with a queue of resident pages instead of slots.
///
/// FIFO pushes on load only. LRU also moves a page to the back on every hit, so the
/// front is always the victim.
pub fn reference_outcomes(algorithm: Algorithm, references: &[i64], frames: usize) -> Vec<Outcome> {
    let mut resident: VecDeque<i64> = VecDeque::new();
    references
        .iter()
        .map(|&page| match resident.iter().position(|p| *p == page) {
            Some(pos) => {
                if algorithm == Algorithm::Lru {
                    let page = resident.remove(pos).unwrap();
                    resident.push_back(page);
                }
                Outcome::Hit
            }
            None => {
                if resident.len() == frames {
                    resident.pop_front();
                }
                resident.push_back(page);
                Outcome::Fault
            }
        })
        .collect()
}
