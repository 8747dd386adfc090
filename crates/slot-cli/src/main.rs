//! `slots` CLI: find common free meeting times in a calendar file.
//!
//! ## Usage
//!
//! ```sh
//! # List everyone with an entry in the calendar
//! slots participants -i calendar.csv
//!
//! # One-hour slots when Alice, Jack and Bob are all free
//! slots find -i calendar.csv -p Alice,Jack,Bob -d 60
//!
//! # Same, as a JSON array, reading the calendar from stdin
//! cat calendar.csv | slots find -p Alice,Jack,Bob -d 60 --json
//!
//! # Maximal jointly free runs inside a custom workday
//! slots free -i calendar.csv -p Alice,Bob --day-start 09:00 --day-end 17:00
//!
//! # Fail on the first invalid record instead of skipping it
//! slots find -i calendar.csv -p Alice -d 30 --strict
//! ```
//!
//! Diagnostics (skipped records, debug traces) go to stderr and are filtered
//! with `RUST_LOG`, defaulting to `warn`.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use slot_engine::workday::parse_time_of_day;
use slot_engine::{
    ingest, AvailabilityEngine, CalendarStore, EngineConfig, RecordPolicy, WorkdayWindow,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common free meeting slots across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (workday window, record policy)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Workday start as HH:MM (overrides the config file)
    #[arg(long, global = true)]
    day_start: Option<String>,

    /// Workday end as HH:MM (overrides the config file)
    #[arg(long, global = true)]
    day_end: Option<String>,

    /// Fail on the first invalid record instead of skipping it
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the participants found in the calendar
    Participants {
        /// Calendar file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Find start times where everyone is free for the given duration
    Find {
        /// Calendar file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Comma-separated participant names
        #[arg(short, long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
        /// Meeting length in minutes
        #[arg(short, long, allow_negative_numbers = true)]
        duration: i64,
        /// Print a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// Show the maximal stretches where everyone is free
    Free {
        /// Calendar file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Comma-separated participant names
        #[arg(short, long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
        /// Print a JSON array instead of one run per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(
        start = %config.workday.start(),
        end = %config.workday.end(),
        policy = ?config.record_policy,
        "resolved config"
    );

    match cli.command {
        Commands::Participants { input, json } => {
            let store = load_store(input.as_deref(), config.record_policy)?;
            let names: Vec<&str> = store.known_participants().into_iter().collect();
            if json {
                println!("{}", serde_json::to_string(&names)?);
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Commands::Find {
            input,
            participants,
            duration,
            json,
        } => {
            let store = load_store(input.as_deref(), config.record_policy)?;
            let engine = AvailabilityEngine::new(&store, config.workday);
            let names = clean_names(participants);
            let slots = engine.find_available_slots_minutes(&names, duration);
            let formatted: Vec<String> = slots.iter().map(|t| format_time(*t)).collect();
            if json {
                println!("{}", serde_json::to_string(&formatted)?);
            } else {
                for slot in formatted {
                    println!("{}", slot);
                }
            }
        }
        Commands::Free {
            input,
            participants,
            json,
        } => {
            let store = load_store(input.as_deref(), config.record_policy)?;
            let engine = AvailabilityEngine::new(&store, config.workday);
            let names = clean_names(participants);
            let runs = engine.free_runs(&names);
            if json {
                println!("{}", serde_json::to_string(&runs)?);
            } else {
                for run in runs {
                    println!(
                        "{}-{} ({} min)",
                        format_time(run.start),
                        format_time(run.end),
                        run.duration_minutes
                    );
                }
            }
        }
    }

    Ok(())
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };

    if cli.day_start.is_some() || cli.day_end.is_some() {
        let start = override_time(cli.day_start.as_deref(), config.workday.start(), "--day-start")?;
        let end = override_time(cli.day_end.as_deref(), config.workday.end(), "--day-end")?;
        config.workday = WorkdayWindow::new(start, end).context("Invalid workday window")?;
    }

    if cli.strict {
        config.record_policy = RecordPolicy::Abort;
    }

    Ok(config)
}

fn override_time(raw: Option<&str>, current: NaiveTime, flag: &str) -> Result<NaiveTime> {
    match raw {
        Some(raw) => parse_time_of_day(raw)
            .with_context(|| format!("Invalid {} '{}': expected HH:MM", flag, raw)),
        None => Ok(current),
    }
}

fn load_store(input: Option<&str>, policy: RecordPolicy) -> Result<CalendarStore> {
    let text = read_input(input)?;
    let mut store = CalendarStore::new();
    let report =
        ingest::load_str(&mut store, &text, policy).context("Failed to load calendar")?;
    debug!(
        loaded = report.loaded,
        skipped = report.skipped.len(),
        participants = store.len(),
        "calendar loaded"
    );
    Ok(store)
}

/// Trim names and drop empties left by stray commas (`-p Alice,,Bob`).
fn clean_names(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
