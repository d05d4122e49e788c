//! Educational simulator for page replacement (FIFO, LRU) and CPU scheduling
//! (Round Robin, non-preemptive SJF).
//!
//! Both engines are pure functions of their inputs: every call builds its state from
//! scratch and returns a complete trace or a [`SimError`]. Raw text is turned into
//! engine inputs by [`parser`], traces are drawn by [`render`], and the interactive
//! shell's navigation lives in [`session`].

pub mod error;
pub mod parser;
pub mod render;
pub mod replacement;
pub mod scheduling;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use error::{Result, SimError};
pub use replacement::{simulate, Algorithm, Outcome, ReplacementStep, ReplacementTrace};
pub use scheduling::{
    check_process_count, simulate_round_robin, simulate_sjf, RoundRobinEvent, Schedule,
    ScheduleRequest, ScheduleSummary, SchedulerKind, SchedulingAlgorithm, SjfEvent,
};
