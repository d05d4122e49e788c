//! Non-preemptive Shortest Job First.

use serde::Serialize;
use tracing::{instrument, trace};

use super::validate_bursts;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SjfEvent {
    /// 1-based position in the burst list.
    pub process_id: usize,
    pub start_time: u64,
    pub end_time: u64,
}

/// Runs processes to completion in ascending burst order, ties by original position.
#[instrument(level = "debug", skip(burst_times), fields(processes = burst_times.len()))]
pub fn simulate_sjf(burst_times: &[i64]) -> Result<Vec<SjfEvent>> {
    let bursts = validate_bursts(burst_times)?;
    let mut order: Vec<usize> = (0..bursts.len()).collect();
    //  Stable sort keeps equal bursts in index order
    order.sort_by_key(|&idx| bursts[idx]);

    let mut clock = 0;
    let events = order
        .into_iter()
        .map(|idx| {
            let start_time = clock;
            clock += bursts[idx];
            trace!(process = idx + 1, start_time, end_time = clock, "job");
            SjfEvent {
                process_id: idx + 1,
                start_time,
                end_time: clock,
            }
        })
        .collect();
    Ok(events)
}

#[cfg(test)]
mod sjf_tests {
    use super::{simulate_sjf, SjfEvent};

    #[test]
    fn shortest_bursts_run_first() {
        let events = simulate_sjf(&[5, 3, 8, 6]).unwrap();
        let rows: Vec<_> = events
            .iter()
            .map(|e| (e.process_id, e.start_time, e.end_time))
            .collect();
        assert_eq!(rows, vec![(2, 0, 3), (1, 3, 8), (4, 8, 14), (3, 14, 22)]);
    }

    #[test]
    fn equal_bursts_keep_input_order() {
        let events = simulate_sjf(&[4, 2, 4, 2]).unwrap();
        let order: Vec<_> = events.iter().map(|e| e.process_id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn single_process() {
        assert_eq!(
            simulate_sjf(&[9]).unwrap(),
            vec![SjfEvent {
                process_id: 1,
                start_time: 0,
                end_time: 9
            }]
        );
    }
}
