//! Round Robin with a fixed quantum.
//!
//! Each pass visits every process in index order. Finished processes are skipped but
//! stay in the cycle, so the interleaving depends only on the burst list and quantum.

use std::fmt;

use serde::Serialize;
use tracing::{instrument, trace};

use super::validate_bursts;
use crate::error::{Result, SimError};

/// One quantum slice executed by a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundRobinEvent {
    /// 1-based position in the burst list.
    pub process_id: usize,
    pub start_time: u64,
    pub run_duration: u64,
    pub remaining_after: u64,
}

impl RoundRobinEvent {
    pub fn end_time(&self) -> u64 {
        self.start_time + self.run_duration
    }
}

impl fmt::Display for RoundRobinEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} ran for {} units (remaining {})",
            self.process_id, self.run_duration, self.remaining_after
        )
    }
}

/// Simulates Round Robin over `burst_times` with the given `quantum`.
///
/// Returns [`SimError::InvalidInput`] if the quantum or any burst time is below 1.
#[instrument(level = "debug", skip(burst_times), fields(processes = burst_times.len()))]
pub fn simulate_round_robin(burst_times: &[i64], quantum: i64) -> Result<Vec<RoundRobinEvent>> {
    let quantum = u64::try_from(quantum)
        .ok()
        .filter(|quantum| *quantum > 0)
        .ok_or_else(|| SimError::invalid(format!("quantum must be at least 1, got {quantum}")))?;
    let mut remaining = validate_bursts(burst_times)?;

    let mut events = Vec::new();
    let mut clock = 0;
    while remaining.iter().any(|left| *left > 0) {
        for (idx, left) in remaining.iter_mut().enumerate() {
            if *left == 0 {
                continue;
            }
            let run_duration = quantum.min(*left);
            *left -= run_duration;
            let event = RoundRobinEvent {
                process_id: idx + 1,
                start_time: clock,
                run_duration,
                remaining_after: *left,
            };
            trace!(?event, "slice");
            events.push(event);
            clock += run_duration;
        }
    }
    Ok(events)
}

#[cfg(test)]
mod round_robin_tests {
    use super::simulate_round_robin;

    #[test]
    fn interleaves_in_fixed_index_order() {
        let events = simulate_round_robin(&[5, 3, 8], 2).unwrap();
        assert_eq!(events[0].to_string(), "P1 ran for 2 units (remaining 3)");

        let slices: Vec<_> = events
            .iter()
            .map(|e| (e.process_id, e.start_time, e.run_duration, e.remaining_after))
            .collect();
        assert_eq!(
            slices,
            vec![
                (1, 0, 2, 3),
                (2, 2, 2, 1),
                (3, 4, 2, 6),
                (1, 6, 2, 1),
                (2, 8, 1, 0),
                (3, 9, 2, 4),
                (1, 11, 1, 0),
                (3, 12, 2, 2),
                (3, 14, 2, 0),
            ]
        );
    }

    #[test]
    fn finished_processes_are_skipped_not_requeued() {
        let events = simulate_round_robin(&[3, 1, 2], 2).unwrap();
        let order: Vec<_> = events.iter().map(|e| e.process_id).collect();
        assert_eq!(order, vec![1, 2, 3, 1]);
        assert_eq!(events[3].start_time, 5);
    }

    #[test]
    fn large_quantum_is_a_single_pass() {
        let events = simulate_round_robin(&[4, 1, 7], 10).unwrap();
        let slices: Vec<_> = events
            .iter()
            .map(|e| (e.process_id, e.start_time, e.end_time(), e.remaining_after))
            .collect();
        assert_eq!(slices, vec![(1, 0, 4, 0), (2, 4, 5, 0), (3, 5, 12, 0)]);
    }

    #[test]
    fn rejects_non_positive_quantum() {
        assert!(simulate_round_robin(&[1], 0).is_err());
        assert!(simulate_round_robin(&[1], -1).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::simulate_round_robin;

    proptest! {
        #[test]
        fn slices_sum_to_each_burst(
            bursts in prop::collection::vec(1i64..20, 1..12),
            quantum in 1i64..8,
        ) {
            let events = simulate_round_robin(&bursts, quantum).unwrap();
            for (idx, burst) in bursts.iter().enumerate() {
                let total: u64 = events
                    .iter()
                    .filter(|e| e.process_id == idx + 1)
                    .map(|e| e.run_duration)
                    .sum();
                prop_assert_eq!(total, *burst as u64);
            }
            //  Slices are back to back from time 0
            let mut clock = 0;
            for event in &events {
                prop_assert_eq!(event.start_time, clock);
                prop_assert!(event.run_duration <= quantum as u64);
                clock = event.end_time();
            }
            prop_assert_eq!(events, simulate_round_robin(&bursts, quantum).unwrap());
        }

        #[test]
        fn quantum_at_least_max_burst_is_fcfs(
            bursts in prop::collection::vec(1i64..20, 1..12),
        ) {
            let quantum = *bursts.iter().max().unwrap();
            let events = simulate_round_robin(&bursts, quantum).unwrap();
            let order: Vec<_> = events.iter().map(|e| e.process_id).collect();
            prop_assert_eq!(order, (1..=bursts.len()).collect::<Vec<_>>());
            prop_assert!(events.iter().all(|e| e.remaining_after == 0));
        }
    }
}
