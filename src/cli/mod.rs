//! Terminal client: argument parsing and command dispatch.

mod commands;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::models::settings::Settings;
use crate::services::events_api::{EventRepository, HttpEventRepository};
use crate::services::settings::SettingsService;
use crate::utils::date::parse_date;

pub use commands::{apply_fields, run_create, run_day, run_delete, run_edit, run_whoami};

#[derive(Debug, Parser)]
#[command(name = "canopy")]
#[command(version, about = "Day-grid calendar client for the Canopy events API")]
pub struct Cli {
    /// Path to config.toml (defaults to CANOPY_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the day grid
    Day {
        /// Day to show (YYYY-MM-DD), today by default
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Start the grid at the current hour and wrap past midnight
        #[arg(long)]
        from_now: bool,

        /// Keep re-rendering on the configured refresh interval
        #[arg(long)]
        watch: bool,
    },
    /// Create an event
    Create {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Edit an existing event
    Edit {
        id: i64,

        /// Day the event is on (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete { id: i64 },
    /// Show the configured user
    Whoami,
}

/// Event fields settable from the command line. Times are
/// `YYYY-MM-DD HH:MM` in local time or RFC 3339.
#[derive(Debug, Clone, Default, Args)]
pub struct EventFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Hex color, e.g. #4f9d69
    #[arg(long)]
    pub color: Option<String>,

    /// Recurrence rule, or "Never"
    #[arg(long)]
    pub recurrence: Option<String>,
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = SettingsService::new(cli.config)
        .get()
        .context("failed to load settings")?;
    log::debug!(
        "Using API at {} ({})",
        settings.api.resolved_base_url(),
        settings.api.environment
    );

    let repository: Arc<dyn EventRepository> = Arc::new(
        HttpEventRepository::from_settings(&settings.api)
            .context("failed to set up the events API client")?,
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(cli.command, repository, &settings, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn dispatch(
    command: Commands,
    repository: Arc<dyn EventRepository>,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<()> {
    let now = Local::now();

    match command {
        Commands::Day {
            date,
            from_now,
            watch,
        } => {
            let date = date.unwrap_or_else(|| now.date_naive());
            if watch {
                commands::watch_day(repository, settings, date, from_now, out)
            } else {
                run_day(repository, settings, date, from_now, now, out)
            }
        }
        Commands::Create { fields } => run_create(repository.as_ref(), settings, &fields, now, out),
        Commands::Edit { id, date, fields } => {
            run_edit(repository.as_ref(), settings, id, date, &fields, out)
        }
        Commands::Delete { id } => run_delete(repository.as_ref(), id, out),
        Commands::Whoami => run_whoami(repository.as_ref(), settings, out),
    }
}
