//! Page replacement simulation over a fixed set of frames.
//!
//! Two eviction policies are provided, selected at run time through [`Algorithm`].
//!
//! # Available Policies
//!
//! - **FIFO**: evicts the page that has been resident longest. Hits never reorder pages.
//! - **LRU**: evicts the page whose most recent reference is oldest. The reference that
//!   loaded a page counts as a reference.
//!
//! # Interface
//!
//! Both policies implement `ReplacementPolicy` with three methods:
//! - `record_hit()`: called when a referenced page is already resident
//! - `on_frame_assigned()`: called after a page is loaded into a slot
//! - `evict_frame()`: selects the slot whose page is replaced
//!
//! Victims are replaced in place, so every other resident page keeps its slot.

use std::{fmt, str::FromStr};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::{Result, SimError};

mod fifo;
mod lru;

/// Page replacement algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LRU")]
    Lru,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Fifo => write!(f, "FIFO"),
            Algorithm::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "lru" => Ok(Algorithm::Lru),
            other => Err(SimError::invalid(format!(
                "unknown page replacement algorithm '{other}' (expected FIFO or LRU)"
            ))),
        }
    }
}

/// Whether a reference found its page resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Hit,
    Fault,
}

/// One record per input reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementStep {
    pub index: usize,
    pub page: i64,
    pub outcome: Outcome,
    /// Frame contents after this reference was applied, one entry per slot.
    pub frames: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementTrace {
    pub algorithm: Algorithm,
    pub frame_count: usize,
    pub steps: Vec<ReplacementStep>,
    pub fault_count: usize,
    pub hit_count: usize,
}

impl ReplacementTrace {
    /// Fraction of references that were hits.
    pub fn hit_ratio(&self) -> f64 {
        self.hit_count as f64 / self.steps.len() as f64
    }

    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.steps.iter().map(|step| step.outcome)
    }
}

/// Victim selection shared by the eviction loop.
pub(crate) trait ReplacementPolicy {
    /// Records a reference to a page that is already resident in `slot`.
    fn record_hit(&mut self, slot: usize, page: i64, index: usize);

    /// Notifies the policy that `page` was loaded into `slot` by reference `index`.
    fn on_frame_assigned(&mut self, slot: usize, page: i64, index: usize);

    /// Selects the slot to be replaced. Only called when every slot is occupied.
    fn evict_frame(&mut self, frames: &[Option<i64>]) -> Option<usize>;
}

/// Fixed-capacity slots holding resident page identifiers.
#[derive(Debug)]
struct FrameSet {
    slots: Vec<Option<i64>>,
    occupied: usize,
}

impl FrameSet {
    fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            occupied: 0,
        }
    }

    fn slot_of(&self, page: i64) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(page))
    }

    /// The lowest empty slot. Slots fill in order and never empty again.
    fn free_slot(&self) -> Option<usize> {
        (self.occupied < self.slots.len()).then_some(self.occupied)
    }

    /// Places `page` into `slot` and returns the page it displaced.
    fn replace(&mut self, slot: usize, page: i64) -> Option<i64> {
        let evicted = self.slots[slot].replace(page);
        if evicted.is_none() {
            self.occupied += 1;
        }
        evicted
    }

    fn snapshot(&self) -> Vec<Option<i64>> {
        self.slots.clone()
    }
}

/// Simulates `algorithm` over `references` with `frame_count` frames.
///
/// Returns [`SimError::InvalidInput`] if `references` is empty or `frame_count` is zero.
#[instrument(level = "debug", skip(references), fields(len = references.len()))]
pub fn simulate(
    algorithm: Algorithm,
    references: &[i64],
    frame_count: usize,
) -> Result<ReplacementTrace> {
    if references.is_empty() {
        return Err(SimError::invalid("page reference sequence is empty"));
    }
    if frame_count == 0 {
        return Err(SimError::invalid("frame count must be at least 1"));
    }
    let trace = match algorithm {
        Algorithm::Fifo => run(
            algorithm,
            fifo::PolicyState::new(frame_count),
            references,
            frame_count,
        ),
        Algorithm::Lru => run(
            algorithm,
            lru::PolicyState::new(frame_count),
            references,
            frame_count,
        ),
    };
    debug!(
        faults = trace.fault_count,
        hits = trace.hit_count,
        "page replacement finished"
    );
    Ok(trace)
}

fn run<P: ReplacementPolicy>(
    algorithm: Algorithm,
    mut policy: P,
    references: &[i64],
    frame_count: usize,
) -> ReplacementTrace {
    let mut frames = FrameSet::new(frame_count);
    let mut steps = Vec::with_capacity(references.len());
    let mut fault_count = 0;
    let mut hit_count = 0;

    for (index, &page) in references.iter().enumerate() {
        //  The label is fixed by membership before the frames change
        let outcome = match frames.slot_of(page) {
            Some(slot) => {
                policy.record_hit(slot, page, index);
                hit_count += 1;
                Outcome::Hit
            }
            None => {
                let slot = match frames.free_slot() {
                    Some(slot) => slot,
                    None => policy
                        .evict_frame(&frames.slots)
                        .expect("A full frame set must always yield a victim"),
                };
                let evicted = frames.replace(slot, page);
                policy.on_frame_assigned(slot, page, index);
                trace!(index, page, slot, ?evicted, "page fault");
                fault_count += 1;
                Outcome::Fault
            }
        };
        debug_assert!(
            frames.slot_of(page).is_some(),
            "page {page} must be resident after reference {index}"
        );
        steps.push(ReplacementStep {
            index,
            page,
            outcome,
            frames: frames.snapshot(),
        });
    }

    ReplacementTrace {
        algorithm,
        frame_count,
        steps,
        fault_count,
        hit_count,
    }
}
