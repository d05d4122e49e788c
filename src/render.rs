//! Text rendering of traces and schedules for terminal output.

use crate::{
    replacement::{Outcome, ReplacementTrace},
    scheduling::{RoundRobinEvent, Schedule, ScheduleSummary, SjfEvent},
};

/// Widest bar drawn by [`gantt`], in characters.
const CHART_WIDTH: u64 = 60;

/// Step-by-step frame occupancy, one row per reference, followed by the counters.
pub fn replacement_table(trace: &ReplacementTrace) -> String {
    let mut result = format!("{} with {} frame(s)\n", trace.algorithm, trace.frame_count);
    let mut header = format!("{:>4} | {:>6} |", "Step", "Page");
    for slot in 1..=trace.frame_count {
        header.push_str(&format!(" {:>6} |", format!("F{slot}")));
    }
    header.push_str(" Result");
    result.push_str(&format!("{header}\n"));
    result.push_str(&format!("{}\n", "-".repeat(header.len())));

    for step in &trace.steps {
        result.push_str(&format!("{:>4} | {:>6} |", step.index + 1, step.page));
        for frame in &step.frames {
            let cell = frame.map_or_else(|| "-".to_string(), |page| page.to_string());
            result.push_str(&format!(" {cell:>6} |"));
        }
        let outcome = match step.outcome {
            Outcome::Hit => "Hit",
            Outcome::Fault => "Fault",
        };
        result.push_str(&format!(" {outcome}\n"));
    }

    result.push_str(&format!(
        "\nPage faults: {}, Hits: {}, Hit ratio: {:.2}%\n",
        trace.fault_count,
        trace.hit_count,
        trace.hit_ratio() * 100.0
    ));
    result
}

pub fn round_robin_table(events: &[RoundRobinEvent]) -> String {
    let mut result = format!(
        "{:<8} | {:>6} | {:>6} | {:>6} | {:>9}\n",
        "Process", "Start", "Run", "End", "Remaining"
    );
    result.push_str(&format!("{}\n", "-".repeat(47)));
    for event in events {
        result.push_str(&format!(
            "{:<8} | {:>6} | {:>6} | {:>6} | {:>9}\n",
            format!("P{}", event.process_id),
            event.start_time,
            event.run_duration,
            event.end_time(),
            event.remaining_after
        ));
    }
    result
}

pub fn sjf_table(events: &[SjfEvent]) -> String {
    let mut result = format!("{:<8} | {:>6} | {:>6}\n", "Process", "Start", "End");
    result.push_str(&format!("{}\n", "-".repeat(26)));
    for event in events {
        result.push_str(&format!(
            "{:<8} | {:>6} | {:>6}\n",
            format!("P{}", event.process_id),
            event.start_time,
            event.end_time
        ));
    }
    result
}

/// Per-process completion, turnaround and waiting times with their averages.
pub fn summary_table(summary: &ScheduleSummary) -> String {
    let mut result = format!(
        "{:<8} | {:>6} | {:>10} | {:>10} | {:>7}\n",
        "Process", "Burst", "Completion", "Turnaround", "Waiting"
    );
    result.push_str(&format!("{}\n", "-".repeat(53)));
    for process in &summary.processes {
        result.push_str(&format!(
            "{:<8} | {:>6} | {:>10} | {:>10} | {:>7}\n",
            format!("P{}", process.process_id),
            process.burst_time,
            process.completion_time,
            process.turnaround_time,
            process.waiting_time
        ));
    }
    result.push_str(&format!(
        "\nAverage waiting time: {:.2}, Average turnaround time: {:.2}\n",
        summary.average_waiting_time, summary.average_turnaround_time
    ));
    result
}

/// Horizontal bar chart with one row per executed interval.
///
/// Long schedules are scaled down so the last bar ends within [`CHART_WIDTH`] columns.
pub fn gantt(schedule: &Schedule) -> String {
    let intervals: Vec<(usize, u64, u64)> = match schedule {
        Schedule::RoundRobin(events) => events
            .iter()
            .map(|e| (e.process_id, e.start_time, e.end_time()))
            .collect(),
        Schedule::ShortestJobFirst(events) => events
            .iter()
            .map(|e| (e.process_id, e.start_time, e.end_time))
            .collect(),
    };
    let total = intervals.last().map_or(0, |interval| interval.2);
    let scale = total.div_ceil(CHART_WIDTH).max(1);

    let mut result = String::new();
    for (process_id, start, end) in intervals {
        let offset = (start / scale) as usize;
        let width = ((end / scale) as usize).saturating_sub(offset).max(1);
        result.push_str(&format!(
            "{:<4} {}{} {start}-{end}\n",
            format!("P{process_id}"),
            " ".repeat(offset),
            "#".repeat(width)
        ));
    }
    result
}

/// Event table, chart and summary for either scheduler.
pub fn schedule_report(schedule: &Schedule) -> String {
    let table = match schedule {
        Schedule::RoundRobin(events) => {
            let mut table = round_robin_table(events);
            table.push('\n');
            for event in events {
                table.push_str(&format!("{event}\n"));
            }
            table
        }
        Schedule::ShortestJobFirst(events) => sjf_table(events),
    };
    format!(
        "{table}\n{}\n{}",
        gantt(schedule),
        summary_table(&schedule.summary())
    )
}

#[cfg(test)]
mod render_tests {
    use super::{gantt, replacement_table, schedule_report, sjf_table};
    use crate::{
        replacement::{simulate, Algorithm},
        scheduling::{simulate_round_robin, simulate_sjf, Schedule},
        test_utils::CLASSIC_REFERENCES,
    };

    #[test]
    fn replacement_table_shows_empty_slots_and_counters() {
        let trace = simulate(Algorithm::Fifo, &CLASSIC_REFERENCES, 3).unwrap();
        let table = replacement_table(&trace);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "FIFO with 3 frame(s)");
        assert_eq!(lines[1], "Step |   Page |     F1 |     F2 |     F3 | Result");
        assert_eq!(lines[3], "   1 |      7 |      7 |      - |      - | Fault");
        assert_eq!(lines[7], "   5 |      0 |      2 |      0 |      1 | Hit");
        assert!(table.ends_with("Page faults: 7, Hits: 1, Hit ratio: 12.50%\n"));
    }

    #[test]
    fn sjf_rows_follow_execution_order() {
        let events = simulate_sjf(&[5, 3, 8, 6]).unwrap();
        let table = sjf_table(&events);
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(rows[0], "P2       |      0 |      3");
        assert_eq!(rows[3], "P3       |     14 |     22");
    }

    #[test]
    fn gantt_bars_are_offset_by_start_time() {
        let schedule = Schedule::ShortestJobFirst(simulate_sjf(&[2, 1]).unwrap());
        assert_eq!(gantt(&schedule), "P2   # 0-1\nP1    ## 1-3\n");
    }

    #[test]
    fn long_schedules_are_scaled_to_fit() {
        let schedule = Schedule::ShortestJobFirst(simulate_sjf(&[500, 100]).unwrap());
        for line in gantt(&schedule).lines() {
            assert!(line.len() <= 4 + 1 + 60 + 1 + "100-600".len());
        }
    }

    #[test]
    fn round_robin_report_lists_every_slice() {
        let schedule = Schedule::RoundRobin(simulate_round_robin(&[5, 3, 8], 2).unwrap());
        let report = schedule_report(&schedule);
        assert!(report.contains("P1 ran for 2 units (remaining 3)"));
        assert!(report.contains("P3 ran for 2 units (remaining 0)"));
        assert!(report.contains("Average waiting time: 7.00"));
    }
}
