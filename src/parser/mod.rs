//! JSONL parser for calendar events.
//!
//! Each non-blank input line holds one JSON object:
//!
//! ```json
//! {"name": "Standup", "start": "2019-01-18T09:00:00", "end": "2019-01-18T09:15:00",
//!  "location": "Room 4", "timezone": "Europe/Berlin", "all_day": false, "selected": false}
//! ```
//!
//! Only `name` and `start` are required; a missing `end` gives the event the
//! default one-hour length. Timestamps are wall-clock: an explicit UTC offset
//! is accepted but only its local reading is kept.

use crate::model::{Event, ParseError, DEFAULT_EVENT_DURATION_MINUTES};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Formats tried, in order, for offset-free timestamps.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Raw JSON structure for deserializing event lines.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    selected: bool,
}

/// Result of parsing a JSONL line with graceful error handling.
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed event.
    Valid(Event),
    /// Line that could not be turned into an event.
    Malformed(ParseError),
}

/// Events read from a whole input plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct ParsedEvents {
    /// Valid events in input order.
    pub events: Vec<Event>,
    /// Errors for skipped lines, in input order.
    pub skipped: Vec<ParseError>,
}

/// Parse a single JSONL line into an [`Event`].
///
/// # Errors
///
/// Returns `ParseError` if the JSON is malformed, `name` or `start` is
/// missing, a timestamp is unrecognised, or the end precedes the start.
pub fn parse_event(raw: &str, line_number: usize) -> Result<Event, ParseError> {
    let raw_event: RawEvent = serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let name = raw_event.name.ok_or(ParseError::MissingField {
        line: line_number,
        field: "name",
    })?;

    let raw_start = raw_event.start.ok_or(ParseError::MissingField {
        line: line_number,
        field: "start",
    })?;
    let start = parse_timestamp(&raw_start).ok_or_else(|| ParseError::InvalidTimestamp {
        line: line_number,
        raw: raw_start.clone(),
    })?;

    let end = match raw_event.end {
        Some(raw_end) => parse_timestamp(&raw_end).ok_or(ParseError::InvalidTimestamp {
            line: line_number,
            raw: raw_end,
        })?,
        None => start
            .checked_add_signed(Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES))
            .ok_or_else(|| ParseError::InvalidTimestamp {
                line: line_number,
                raw: raw_start.clone(),
            })?,
    };

    let event = Event::new(
        name,
        start,
        end,
        raw_event.location,
        raw_event.timezone,
        raw_event.all_day,
    )
    .map_err(|source| ParseError::InvalidEvent {
        line: line_number,
        source,
    })?;

    Ok(event.selected(raw_event.selected))
}

/// Parse a single JSONL line gracefully.
///
/// Unlike [`parse_event`], this never returns an error; failures come back
/// as [`ParseResult::Malformed`] so callers can keep going.
pub fn parse_event_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_event(raw, line_number) {
        Ok(event) => ParseResult::Valid(event),
        Err(error) => ParseResult::Malformed(error),
    }
}

/// Parse every non-blank line of `input`, skipping malformed ones.
///
/// Each skipped line is logged at `warn` level.
pub fn parse_events(input: &str) -> ParsedEvents {
    let mut parsed = ParsedEvents::default();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_event_graceful(line, index + 1) {
            ParseResult::Valid(event) => parsed.events.push(event),
            ParseResult::Malformed(error) => {
                tracing::warn!(line = error.line(), error = %error, "Skipping malformed event");
                parsed.skipped.push(error);
            }
        }
    }

    tracing::debug!(
        events = parsed.events.len(),
        skipped = parsed.skipped.len(),
        "Parsed event input"
    );
    parsed
}

/// Parse a wall-clock timestamp.
///
/// Accepts RFC 3339 (offset dropped, local reading kept), the offset-free
/// ISO forms in [`NAIVE_FORMATS`], or a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
