use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use osync::{
    parser::parse_int_list,
    render,
    replacement::{self, Algorithm},
    session::{self, Screen},
    Schedule, ScheduleRequest, ScheduleSummary, SchedulerKind, SchedulingAlgorithm, SimError,
};

#[derive(Debug, Parser)]
#[command(
    name = "osync",
    version,
    about = "Page replacement and CPU scheduling simulator",
    long_about = "Simulates FIFO/LRU page replacement and Round Robin/SJF scheduling. \
                  Run without a subcommand to start the interactive shell."
)]
struct Cli {
    /// Output format for batch runs.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "OSYNC_FORMAT",
        default_value_t = Format::Table
    )]
    format: Format,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate page replacement over a reference string.
    Pages {
        /// FIFO or LRU.
        #[arg(long, short)]
        algorithm: Algorithm,
        /// Number of frames.
        #[arg(long, short)]
        frames: usize,
        /// Comma-separated page references, e.g. "7,0,1,2,0,3,0,4".
        #[arg(long, short, allow_hyphen_values = true)]
        refs: String,
    },
    /// Simulate CPU scheduling over a list of burst times.
    Schedule {
        /// RR or SJF.
        #[arg(long, short)]
        algorithm: SchedulerKind,
        /// Time quantum, required for Round Robin.
        #[arg(long, short, allow_negative_numbers = true)]
        quantum: Option<i64>,
        /// Declared number of processes, checked against the burst list.
        #[arg(long, short)]
        processes: Option<usize>,
        /// Comma-separated burst times, e.g. "5,3,8,6".
        #[arg(long, short, allow_hyphen_values = true)]
        bursts: String,
    },
}

#[derive(Serialize)]
struct ScheduleReport<'a> {
    algorithm: SchedulingAlgorithm,
    schedule: &'a Schedule,
    summary: ScheduleSummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("OSYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(command) => run_batch(command, cli.format),
        None => run_shell(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_batch(command: Command, format: Format) -> Result<(), Box<dyn Error>> {
    println!("{}", batch_output(command, format)?);
    Ok(())
}

/// Runs one subcommand and renders its result in `format`.
fn batch_output(command: Command, format: Format) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Command::Pages {
            algorithm,
            frames,
            refs,
        } => {
            let references = parse_int_list(&refs)?;
            info!(%algorithm, frames, references = references.len(), "simulating page replacement");
            let trace = replacement::simulate(algorithm, &references, frames)?;
            match format {
                Format::Table => render::replacement_table(&trace),
                Format::Json => serde_json::to_string_pretty(&trace)?,
            }
        }
        Command::Schedule {
            algorithm,
            quantum,
            processes,
            bursts,
        } => {
            let algorithm = match (algorithm, quantum) {
                (SchedulerKind::RoundRobin, Some(quantum)) => {
                    SchedulingAlgorithm::RoundRobin { quantum }
                }
                (SchedulerKind::RoundRobin, None) => {
                    return Err(SimError::InvalidInput {
                        reason: "Round Robin requires --quantum".to_string(),
                    }
                    .into());
                }
                (SchedulerKind::ShortestJobFirst, _) => SchedulingAlgorithm::ShortestJobFirst,
            };
            let request = ScheduleRequest {
                algorithm,
                declared_processes: processes,
                burst_times: parse_int_list(&bursts)?,
            };
            info!(%algorithm, processes = request.burst_times.len(), "simulating scheduling");
            let schedule = request.run()?;
            match format {
                Format::Table => render::schedule_report(&schedule),
                Format::Json => serde_json::to_string_pretty(&ScheduleReport {
                    algorithm,
                    summary: schedule.summary(),
                    schedule: &schedule,
                })?,
            }
        }
    };
    Ok(output)
}

fn run_shell() -> Result<(), Box<dyn Error>> {
    println!("OSync Simulator v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' to exit");
    println!();

    let mut screen = Screen::default();
    println!("{}", screen.help());
    loop {
        print!("{}", screen.prompt());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            //  EOF
            println!();
            break;
        }

        let (next, reply) = session::step(screen, input.trim());
        screen = next;
        if !reply.output.is_empty() {
            println!("{}", reply.output);
        }
        if reply.quit {
            break;
        }
    }
    Ok(())
}
