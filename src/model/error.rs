//! Error types for the daygrid application.
//!
//! Errors are layered with `thiserror` and compose through `?` and `From`
//! conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`InputError`] - File/stdin reading failures
//!   - [`ParseError`] - JSONL event parsing failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file and validation failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Log file setup failures
//!
//! # Error Recovery Strategy
//!
//! Parse errors are **non-fatal**: a malformed event line is logged with
//! `tracing::warn!`, counted and skipped, and layout proceeds with the rest.
//! Input, config and logging errors are fatal and end the run.
//!
//! The layout core never returns errors: degenerate input is clamped.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::event::InvalidEvent;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use daygrid::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     // InputError converts to AppError via From
///     let _events = read_events()?;
///     Ok(())
/// }
/// # fn read_events() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse an event line. Only surfaces when a caller opts out of
    /// graceful parsing.
    #[error("Failed to parse event: {0}")]
    Parse(#[from] ParseError),

    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the report failed (closed pipe, full disk).
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing the JSON report failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors encountered when reading event input from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified events file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use daygrid::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading from input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing JSONL event lines.
///
/// All variants carry the 1-based `line` so users can find the offending
/// entry in an editor.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line contains syntactically invalid JSON, or a field has the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// use daygrid::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// The JSON parser error message.
        message: String,
    },

    /// A required field ("name" or "start") is missing.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the missing JSON key.
        field: &'static str,
    },

    /// A "start" or "end" value is not a recognised date-time.
    #[error("Invalid timestamp '{raw}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number.
        line: usize,
        /// The value exactly as it appeared in the input.
        raw: String,
    },

    /// The fields parsed but do not form a valid event.
    #[error("Invalid event at line {line}: {source}")]
    InvalidEvent {
        /// 1-based line number.
        line: usize,
        /// Why the event was rejected.
        #[source]
        source: InvalidEvent,
    },
}

impl ParseError {
    /// 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. }
            | ParseError::MissingField { line, .. }
            | ParseError::InvalidTimestamp { line, .. }
            | ParseError::InvalidEvent { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io;

    #[test]
    fn input_error_file_not_found_display() {
        let err = InputError::FileNotFound {
            path: PathBuf::from("/tmp/missing.jsonl"),
        };
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("/tmp/missing.jsonl"));
    }

    #[test]
    fn input_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io_err.into();
        assert!(matches!(err, InputError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn parse_error_missing_field_display() {
        let err = ParseError::MissingField {
            line: 15,
            field: "start",
        };
        let msg = err.to_string();
        assert!(msg.contains("'start'"));
        assert!(msg.contains("line 15"));
    }

    #[test]
    fn parse_error_invalid_timestamp_display() {
        let err = ParseError::InvalidTimestamp {
            line: 8,
            raw: "not-a-time".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid timestamp 'not-a-time' at line 8");
    }

    #[test]
    fn parse_error_invalid_event_keeps_source() {
        let day = NaiveDate::from_ymd_opt(2019, 1, 18).unwrap();
        let err = ParseError::InvalidEvent {
            line: 3,
            source: InvalidEvent::EndBeforeStart {
                start: day.and_hms_opt(10, 0, 0).unwrap(),
                end: day.and_hms_opt(9, 0, 0).unwrap(),
            },
        };
        assert_eq!(err.line(), 3);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn app_error_wraps_domain_errors() {
        let err: AppError = InputError::FileNotFound {
            path: PathBuf::from("x.jsonl"),
        }
        .into();
        assert!(err.to_string().starts_with("Failed to read input"));

        let err: AppError = ConfigError::InvalidValue {
            key: "default_hour",
            reason: "must be between 0 and 23, got 30".to_string(),
        }
        .into();
        assert!(err.to_string().contains("default_hour"));

        let err: AppError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, AppError::Output(_)));
    }
}
