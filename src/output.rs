//! Reports printed by the CLI.
//!
//! A [`DayReport`] is a flat, serializable view of an [`ArrangedDay`]. It is
//! written either as pretty JSON or as a plain-text table.

use crate::config::GridConfig;
use crate::layout::{
    gridlines, hour_labels, ArrangedDay, ElementKind, Gridline, HourLabel, TimeCoordinateMapper,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Report encoding selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable table.
    Text,
}

/// Geometry and details of one timed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEntry {
    /// Position among the day's timed events.
    pub index: usize,
    /// Event name.
    pub name: String,
    /// Display range such as "9:00 AM - 10:00 AM".
    pub time: String,
    /// Wall-clock start.
    pub start: NaiveDateTime,
    /// Wall-clock end.
    pub end: NaiveDateTime,
    /// Location, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Timezone name, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Whether the event is selected.
    pub selected: bool,
    /// Left edge as a fraction of the grid width.
    pub x_fraction: f64,
    /// Width as a fraction of the grid width.
    pub width_fraction: f64,
    /// Top edge in pixels.
    pub y_offset: f64,
    /// Height in pixels.
    pub height: f64,
    /// Draw order; higher is on top.
    pub z_index: u32,
    /// Column-packed or stacked.
    pub kind: ElementKind,
}

/// One row of the all-day strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllDayEntry {
    /// Position among the day's all-day events.
    pub index: usize,
    /// Event name.
    pub name: String,
    /// Top of the row inside the strip.
    pub y_offset: f64,
    /// Row height.
    pub height: f64,
}

/// Grid background elements, only included on request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decorations {
    /// Hour and half-hour lines, top to bottom.
    pub gridlines: Vec<Gridline>,
    /// One label per hour.
    pub hour_labels: Vec<HourLabel>,
}

/// Everything the CLI prints for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    /// Day that was laid out.
    pub day: NaiveDate,
    /// Grid density.
    pub pixels_per_minute: f64,
    /// Offset of 00:00 from the top of the grid.
    pub top_inset_margin: f64,
    /// Total scrollable height of the grid.
    pub content_height: f64,
    /// Scroll offset that shows the default hour at the top.
    pub initial_scroll_offset: f64,
    /// Whether overlapping timed events were merged.
    pub merged: bool,
    /// Number of input lines that could not be parsed.
    pub skipped_lines: usize,
    /// Height of the all-day strip.
    pub all_day_height: f64,
    /// All-day rows in input order.
    pub all_day: Vec<AllDayEntry>,
    /// Timed events with their geometry.
    pub events: Vec<TimedEntry>,
    /// Item indices of each overlap cluster.
    pub clusters: Vec<Vec<usize>>,
    /// Gridlines and labels, with `--decorations` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Decorations>,
}

impl DayReport {
    /// Flatten an arranged day.
    pub fn new(
        arranged: &ArrangedDay,
        config: &GridConfig,
        merged: bool,
        skipped_lines: usize,
        with_decorations: bool,
    ) -> Self {
        let mapper = TimeCoordinateMapper::from_config(config);

        let events = arranged
            .timed_with_attributes()
            .enumerate()
            .map(|(index, (event, attr))| TimedEntry {
                index,
                name: event.name().to_string(),
                time: event.display_time_string(),
                start: event.start(),
                end: event.end(),
                location: event.location().map(str::to_string),
                timezone: event.timezone().map(str::to_string),
                selected: event.is_selected(),
                x_fraction: attr.x_fraction,
                width_fraction: attr.width_fraction,
                y_offset: attr.y_offset,
                height: attr.height,
                z_index: attr.z_index,
                kind: attr.kind,
            })
            .collect();

        let all_day = arranged
            .all_day()
            .iter()
            .enumerate()
            .filter_map(|(index, event)| {
                let row = arranged.all_day_attributes_for(index.into())?;
                Some(AllDayEntry {
                    index,
                    name: event.name().to_string(),
                    y_offset: row.y_offset,
                    height: row.height,
                })
            })
            .collect();

        let clusters = arranged
            .snapshot()
            .clusters()
            .iter()
            .map(|cluster| {
                let mut members: Vec<usize> =
                    cluster.members().iter().map(|m| m.index.get()).collect();
                members.sort_unstable();
                members
            })
            .collect();

        let decorations = with_decorations.then(|| Decorations {
            gridlines: gridlines(&mapper),
            hour_labels: hour_labels(&mapper),
        });

        Self {
            day: arranged.day(),
            pixels_per_minute: config.pixels_per_minute(),
            top_inset_margin: config.top_inset_margin(),
            content_height: mapper.content_height(),
            initial_scroll_offset: mapper.scroll_offset_for_hour(config.default_hour()),
            merged,
            skipped_lines,
            all_day_height: arranged.all_day_height(),
            all_day,
            events,
            clusters,
            decorations,
        }
    }

    /// Plain-text rendering, one line per event.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Day: {}", self.day);
        let _ = writeln!(
            out,
            "Grid: {} px/min, inset {:.1}, height {:.1}",
            self.pixels_per_minute, self.top_inset_margin, self.content_height
        );

        let _ = writeln!(out, "All-day ({:.1} px):", self.all_day_height);
        for entry in &self.all_day {
            let _ = writeln!(out, "  - {}", entry.name);
        }

        let _ = writeln!(out, "Timed:");
        for entry in &self.events {
            let marker = match entry.kind {
                ElementKind::StackedEvent => "*",
                _ => " ",
            };
            let _ = writeln!(
                out,
                "  [{}]{} {:<19} x={:.3} w={:.3} y={:.1} h={:.1} z={} {}",
                entry.index,
                marker,
                entry.time,
                entry.x_fraction,
                entry.width_fraction,
                entry.y_offset,
                entry.height,
                entry.z_index,
                entry.name
            );
        }

        if self.skipped_lines > 0 {
            let _ = writeln!(out, "Skipped lines: {}", self.skipped_lines);
        }
        out
    }

    /// Write the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error, or a serialization error for JSON.
    pub fn write_to<W: Write>(
        &self,
        mut writer: W,
        format: OutputFormat,
    ) -> Result<(), crate::model::AppError> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writeln!(writer)?;
            }
            OutputFormat::Text => writer.write_all(self.to_text().as_bytes())?,
        }
        writer.flush()?;
        Ok(())
    }
}
