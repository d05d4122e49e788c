//! Navigation state for the interactive shell.
//!
//! The shell has three screens mirroring the simulator's menus. [`step`] is a pure
//! transition: it takes the current [`Screen`] and one input line and returns the next
//! screen with the text to show. Nothing here is visible to the simulation engines.

use crate::{
    error::Result,
    parser::{parse_int_list, parse_positive},
    render,
    replacement::{self, Algorithm},
    scheduling::{ScheduleRequest, SchedulerKind, SchedulingAlgorithm},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    PageReplacement,
    ProcessScheduling,
}

impl Screen {
    pub fn prompt(&self) -> &'static str {
        match self {
            Screen::Home => "osync> ",
            Screen::PageReplacement => "osync/pages> ",
            Screen::ProcessScheduling => "osync/schedule> ",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Screen::Home => {
                "OSync: Page Replacement & Scheduling Simulator\n\
                 \x20 pages        - Open the page replacement simulator\n\
                 \x20 schedule     - Open the process scheduling simulator\n\
                 \x20 help         - Show this help message\n\
                 \x20 quit/exit    - Exit the shell"
            }
            Screen::PageReplacement => {
                "Page Replacement Simulator\n\
                 \x20 fifo <frames> <refs>   - e.g. fifo 3 7, 0, 1, 2, 0, 3, 0, 4\n\
                 \x20 lru <frames> <refs>    - e.g. lru 3 7, 0, 1, 2, 0, 3, 0, 4\n\
                 \x20 back                   - Return to the home screen"
            }
            Screen::ProcessScheduling => {
                "Process Scheduling Simulator\n\
                 \x20 rr <processes> <quantum> <bursts>  - e.g. rr 3 2 5, 3, 8\n\
                 \x20 sjf <processes> <bursts>           - e.g. sjf 4 5, 3, 8, 6\n\
                 \x20 back                               - Return to the home screen"
            }
        }
    }
}

/// Text produced for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Applies one line of input to `screen`.
pub fn step(screen: Screen, line: &str) -> (Screen, Reply) {
    let (command, rest) = split_word(line);
    match command.to_ascii_lowercase().as_str() {
        "" => (screen, Reply::default()),
        "quit" | "exit" => (
            screen,
            Reply {
                output: "Goodbye!".to_string(),
                quit: true,
            },
        ),
        "help" => (screen, Reply::text(screen.help())),
        "home" | "back" => (Screen::Home, Reply::text(Screen::Home.help())),
        command => match screen {
            Screen::Home => home(command),
            Screen::PageReplacement => (screen, respond(page_replacement(command, rest))),
            Screen::ProcessScheduling => (screen, respond(process_scheduling(command, rest))),
        },
    }
}

fn respond(result: Result<String>) -> Reply {
    match result {
        Ok(output) => Reply::text(output),
        Err(e) => Reply::text(format!("Error: {e}")),
    }
}

fn home(command: &str) -> (Screen, Reply) {
    match command {
        "pages" | "1" => (
            Screen::PageReplacement,
            Reply::text(Screen::PageReplacement.help()),
        ),
        "schedule" | "2" => (
            Screen::ProcessScheduling,
            Reply::text(Screen::ProcessScheduling.help()),
        ),
        other => (
            Screen::Home,
            Reply::text(format!("Unknown command '{other}'. Type 'help' for commands.")),
        ),
    }
}

fn page_replacement(command: &str, rest: &str) -> Result<String> {
    let algorithm: Algorithm = command.parse()?;
    let (frames, refs) = split_word(rest);
    let frame_count = parse_positive(frames, "frame count")?;
    let references = parse_int_list(refs)?;
    let trace = replacement::simulate(algorithm, &references, frame_count)?;
    Ok(render::replacement_table(&trace))
}

fn process_scheduling(command: &str, rest: &str) -> Result<String> {
    let kind: SchedulerKind = command.parse()?;
    let (processes, rest) = split_word(rest);
    let declared = parse_positive(processes, "process count")?;
    let (algorithm, bursts) = match kind {
        SchedulerKind::RoundRobin => {
            let (quantum, bursts) = split_word(rest);
            let quantum = parse_positive(quantum, "quantum")?;
            (
                SchedulingAlgorithm::RoundRobin {
                    quantum: quantum as i64,
                },
                bursts,
            )
        }
        SchedulerKind::ShortestJobFirst => (SchedulingAlgorithm::ShortestJobFirst, rest),
    };
    let request = ScheduleRequest {
        algorithm,
        declared_processes: Some(declared),
        burst_times: parse_int_list(bursts)?,
    };
    let schedule = request.run()?;
    Ok(format!(
        "Running {}...\n\n{}",
        request.algorithm,
        render::schedule_report(&schedule)
    ))
}

/// Splits off the first whitespace-delimited word.
fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(end) => (&line[..end], line[end..].trim_start()),
        None => (line, ""),
    }
}
