//! CPU scheduling simulation over a list of burst times.
//!
//! Every process is ready at time 0 and is identified by its 1-based position in the
//! burst list. Two schedulers are provided:
//!
//! - **Round Robin** ([`simulate_round_robin`]): fixed quantum, fixed cyclic visiting order.
//! - **SJF** ([`simulate_sjf`]): non-preemptive, shortest burst first, ties by position.
//!
//! [`ScheduleRequest`] is the single entry point used by front ends. It checks the
//! declared process count before any burst time is inspected.

use std::{fmt, str::FromStr};

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SimError};

mod round_robin;
mod sjf;

pub use round_robin::{simulate_round_robin, RoundRobinEvent};
pub use sjf::{simulate_sjf, SjfEvent};

/// Scheduling algorithm together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulingAlgorithm {
    RoundRobin { quantum: i64 },
    ShortestJobFirst,
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingAlgorithm::RoundRobin { quantum } => {
                write!(f, "Round Robin (quantum {quantum})")
            }
            SchedulingAlgorithm::ShortestJobFirst => write!(f, "Shortest Job First (SJF)"),
        }
    }
}

/// Algorithm family without parameters, as named by users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerKind {
    RoundRobin,
    ShortestJobFirst,
}

impl FromStr for SchedulerKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rr" | "round-robin" | "round robin" | "roundrobin" => Ok(SchedulerKind::RoundRobin),
            "sjf" | "shortest-job-first" | "shortest job first" => {
                Ok(SchedulerKind::ShortestJobFirst)
            }
            other => Err(SimError::invalid(format!(
                "unknown scheduling algorithm '{other}' (expected RR or SJF)"
            ))),
        }
    }
}

/// Rejects a burst list whose length differs from the declared process count.
///
/// This is independent of whether the burst values themselves are valid.
pub fn check_process_count(declared: usize, burst_times: &[i64]) -> Result<()> {
    if declared != burst_times.len() {
        return Err(SimError::CountMismatch {
            declared,
            actual: burst_times.len(),
        });
    }
    Ok(())
}

/// Validates a burst list: non-empty, every burst at least 1, and a total that fits
/// the simulated clock.
pub(crate) fn validate_bursts(burst_times: &[i64]) -> Result<Vec<u64>> {
    if burst_times.is_empty() {
        return Err(SimError::invalid("burst time list is empty"));
    }
    let bursts = burst_times
        .iter()
        .enumerate()
        .map(|(idx, &burst)| {
            u64::try_from(burst)
                .ok()
                .filter(|burst| *burst > 0)
                .ok_or_else(|| {
                    SimError::invalid(format!(
                        "burst time of P{} must be at least 1, got {burst}",
                        idx + 1
                    ))
                })
        })
        .collect::<Result<Vec<u64>>>()?;
    bursts
        .iter()
        .try_fold(0u64, |total, burst| total.checked_add(*burst))
        .ok_or_else(|| SimError::invalid("total burst time exceeds the simulated clock range"))?;
    Ok(bursts)
}

/// A scheduling run as requested by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub algorithm: SchedulingAlgorithm,
    pub declared_processes: Option<usize>,
    pub burst_times: Vec<i64>,
}

impl ScheduleRequest {
    pub fn run(&self) -> Result<Schedule> {
        if let Some(declared) = self.declared_processes {
            check_process_count(declared, &self.burst_times)?;
        }
        let schedule = match self.algorithm {
            SchedulingAlgorithm::RoundRobin { quantum } => {
                Schedule::RoundRobin(simulate_round_robin(&self.burst_times, quantum)?)
            }
            SchedulingAlgorithm::ShortestJobFirst => {
                Schedule::ShortestJobFirst(simulate_sjf(&self.burst_times)?)
            }
        };
        debug!(algorithm = %self.algorithm, events = schedule.len(), "schedule computed");
        Ok(schedule)
    }
}

/// Output of either scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "algorithm", content = "events")]
pub enum Schedule {
    RoundRobin(Vec<RoundRobinEvent>),
    ShortestJobFirst(Vec<SjfEvent>),
}

impl Schedule {
    fn len(&self) -> usize {
        match self {
            Schedule::RoundRobin(events) => events.len(),
            Schedule::ShortestJobFirst(events) => events.len(),
        }
    }

    /// Per-process completion, turnaround and waiting times.
    pub fn summary(&self) -> ScheduleSummary {
        //  (process id, burst, completion)
        let mut rows: Vec<(usize, u64, u64)> = Vec::new();
        match self {
            Schedule::RoundRobin(events) => {
                for event in events {
                    let end = event.start_time + event.run_duration;
                    match rows.iter_mut().find(|row| row.0 == event.process_id) {
                        Some(row) => {
                            row.1 += event.run_duration;
                            row.2 = end;
                        }
                        None => rows.push((event.process_id, event.run_duration, end)),
                    }
                }
            }
            Schedule::ShortestJobFirst(events) => {
                rows.extend(events.iter().map(|event| {
                    (
                        event.process_id,
                        event.end_time - event.start_time,
                        event.end_time,
                    )
                }));
            }
        }
        rows.sort_by_key(|row| row.0);
        ScheduleSummary::new(
            rows.into_iter()
                .map(|(process_id, burst_time, completion_time)| ProcessSummary {
                    process_id,
                    burst_time,
                    completion_time,
                    turnaround_time: completion_time,
                    waiting_time: completion_time - burst_time,
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub process_id: usize,
    pub burst_time: u64,
    pub completion_time: u64,
    pub turnaround_time: u64,
    pub waiting_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub processes: Vec<ProcessSummary>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl ScheduleSummary {
    fn new(processes: Vec<ProcessSummary>) -> Self {
        let count = processes.len().max(1) as f64;
        //  Summed as f64: per-process times fit the clock but their sum may not
        let waiting: f64 = processes.iter().map(|p| p.waiting_time as f64).sum();
        let turnaround: f64 = processes.iter().map(|p| p.turnaround_time as f64).sum();
        Self {
            average_waiting_time: waiting / count,
            average_turnaround_time: turnaround / count,
            processes,
        }
    }
}
