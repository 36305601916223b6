//! Event input sources.
//!
//! Events arrive as JSONL either from a file given on the command line or
//! from piped stdin. Both are read to the end once; a layout pass needs the
//! whole day before it can place anything.

use crate::model::error::InputError;
use crate::parser::{parse_events, ParsedEvents};
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for JSONL event data.
#[derive(Debug)]
pub enum InputSource {
    /// Events file named on the command line.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read the whole input and parse it into events.
    ///
    /// Malformed lines are skipped and reported in
    /// [`ParsedEvents::skipped`], they never fail the read.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn read_events(self) -> Result<ParsedEvents, InputError> {
        let contents = match self {
            InputSource::File(f) => f.read_all()?,
            InputSource::Stdin(s) => s.read_all()?,
        };
        Ok(parse_events(&contents))
    }

    /// Human-readable name for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// A file path wins; without one, stdin is used.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new())),
    }
}
