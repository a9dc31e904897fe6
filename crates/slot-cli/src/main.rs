//! `slotfind` CLI — find and book the earliest common meeting slot.
//!
//! ## Usage
//!
//! ```sh
//! # Book a one-hour meeting for alice and bob (prints JSON)
//! slotfind schedule --data team.json --participants alice,bob --duration 60 \
//!     --earliest 2026-03-02T09:00:00Z --latest 2026-03-02T17:00:00Z
//!
//! # Same, saving the new meeting back into team.json
//! slotfind schedule --data team.json --participants alice,bob --duration 60 \
//!     --earliest 2026-03-02T09:00:00Z --latest 2026-03-02T17:00:00Z --write
//!
//! # Show merged busy blocks and free gaps
//! slotfind availability --data team.json --participants alice,bob \
//!     --earliest 2026-03-02T09:00:00Z --latest 2026-03-02T17:00:00Z
//!
//! # Use custom business hours
//! slotfind --config hours.toml schedule ...
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use meeting_scheduler::{
    InMemoryStore, MeetingScheduler, ParticipantId, ScheduleOutcome, SchedulerConfig,
    SchedulerError, SchedulingRequest, StoreSnapshot,
};
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Exit code for requests rejected as malformed.
const EXIT_INVALID_REQUEST: i32 = 2;

#[derive(Parser)]
#[command(
    name = "slotfind",
    version,
    about = "Find the earliest slot every participant has free"
)]
struct Cli {
    /// TOML file with business hours (defaults to 09:00-17:00 UTC)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book the earliest common slot
    Schedule {
        /// JSON store snapshot with participants and meetings
        #[arg(short, long)]
        data: PathBuf,
        /// Comma-separated participant ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
        /// Meeting length in minutes
        #[arg(long)]
        duration: u32,
        /// Earliest start (RFC 3339)
        #[arg(long)]
        earliest: DateTime<Utc>,
        /// Latest end (RFC 3339)
        #[arg(long)]
        latest: DateTime<Utc>,
        /// Write the booked meeting back into the data file
        #[arg(long)]
        write: bool,
    },
    /// Show merged busy blocks and free gaps
    Availability {
        /// JSON store snapshot with participants and meetings
        #[arg(short, long)]
        data: PathBuf,
        /// Comma-separated participant ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
        /// Window start (RFC 3339)
        #[arg(long)]
        earliest: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        latest: DateTime<Utc>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "no .env file loaded");
    }

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let hours = config
        .business_hours()
        .context("Invalid business hours configuration")?;

    match cli.command {
        Commands::Schedule {
            data,
            participants,
            duration,
            earliest,
            latest,
            write,
        } => {
            let store = Arc::new(load_store(&data)?);
            let scheduler = MeetingScheduler::new(store.clone(), store.clone(), hours);
            let request = SchedulingRequest::new(participants, duration, earliest, latest);

            let outcome = match scheduler.schedule(&request).await {
                Ok(outcome) => outcome,
                Err(e) => return report_error(e),
            };

            let body = match &outcome {
                ScheduleOutcome::Scheduled(meeting) => {
                    json!({ "status": "scheduled", "meeting": meeting })
                }
                ScheduleOutcome::NoSlot => json!({ "status": "no_slot" }),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);

            if write && outcome.meeting().is_some() {
                save_store(&data, &store.snapshot().await)?;
            }
        }
        Commands::Availability {
            data,
            participants,
            earliest,
            latest,
        } => {
            let store = Arc::new(load_store(&data)?);
            let scheduler = MeetingScheduler::new(store.clone(), store, hours);
            let ids: BTreeSet<ParticipantId> =
                participants.into_iter().map(ParticipantId::from).collect();

            match scheduler.availability(&ids, earliest, latest).await {
                Ok(availability) => {
                    println!("{}", serde_json::to_string_pretty(&availability)?);
                }
                Err(e) => return report_error(e),
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default: warnings).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SchedulerConfig> {
    let config = match path {
        Some(path) => SchedulerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let snapshot: StoreSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
    Ok(InMemoryStore::from_snapshot(snapshot))
}

fn save_store(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write data file: {}", path.display()))
}

/// Invalid requests are an answer, not a crash: print them as JSON and exit 2.
/// Everything else propagates as an error.
fn report_error(error: SchedulerError) -> Result<()> {
    if error.is_invalid_request() {
        warn!(error = %error, "invalid request");
        let body = json!({ "status": "invalid_request", "reason": error.to_string() });
        println!("{}", serde_json::to_string_pretty(&body)?);
        process::exit(EXIT_INVALID_REQUEST);
    }
    Err(error.into())
}
