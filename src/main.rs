//! daygrid - Entry Point

use chrono::{Local, NaiveDate};
use clap::Parser;
use daygrid::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
};
use daygrid::layout::{DayGrid, EventCreator};
use daygrid::model::{AppError, Event};
use daygrid::output::{DayReport, OutputFormat};
use std::path::PathBuf;
use tracing::info;

/// daygrid - lay out a day of calendar events on a time grid
#[derive(Parser, Debug)]
#[command(name = "daygrid")]
#[command(version)]
#[command(about = "Lay out one day of calendar events as non-overlapping columns")]
pub struct Args {
    /// Path to JSONL events file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Day to lay out, YYYY-MM-DD (defaults to the first timed event's day)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Merge overlapping and adjacent timed events before layout
    #[arg(short, long)]
    pub merge: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Grid density in pixels per minute
    #[arg(long)]
    pub pixels_per_minute: Option<f64>,

    /// Create a new event as if the grid was tapped at this y offset
    #[arg(long, value_name = "Y")]
    pub tap: Option<f64>,

    /// Include gridlines and hour labels in JSON output
    #[arg(long)]
    pub decorations: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Day of the first timed event, else today.
fn default_day(events: &[Event]) -> NaiveDate {
    events
        .iter()
        .find(|event| !event.is_all_day())
        .map(|event| event.start().date())
        .unwrap_or_else(|| Local::now().date_naive())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        // --merge only ever turns merging on
        let merge_override = args.merge.then_some(true);
        apply_cli_overrides(with_env, args.pixels_per_minute, merge_override)
    };

    daygrid::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let grid_config = config.grid_config()?;

    let input_source = daygrid::source::detect_input_source(args.file.clone())?;
    info!(source = %input_source.describe(), "Reading events");
    let parsed = input_source.read_events()?;

    let day = args.date.unwrap_or_else(|| default_day(&parsed.events));

    let mut events = parsed.events;
    if let Some(y) = args.tap {
        let created = EventCreator::from_config(&grid_config).create_at(day, y);
        info!(start = %created.start(), end = %created.end(), "Created event from tap");
        events.push(created);
    }

    let arranged = DayGrid::new(&grid_config, config.merge_events).arrange(&events, day);
    info!(
        %day,
        timed = arranged.timed().len(),
        all_day = arranged.all_day().len(),
        skipped = parsed.skipped.len(),
        "Layout complete"
    );

    let report = DayReport::new(
        &arranged,
        &grid_config,
        config.merge_events,
        parsed.skipped.len(),
        args.decorations,
    );
    report.write_to(std::io::stdout().lock(), args.format)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}
