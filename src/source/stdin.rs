//! Stdin-based event source for piped input.

use crate::model::error::InputError;
use std::io::{BufReader, Read};

/// Source reading JSONL from any reader, stdin in production.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource").finish_non_exhaustive()
    }
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from stdin.
    pub fn new() -> Self {
        Self::from_reader(std::io::stdin())
    }
}

impl Default for StdinSource<std::io::Stdin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> StdinSource<R> {
    /// Create StdinSource from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read until EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors, including invalid UTF-8.
    pub fn read_all(mut self) -> Result<String, InputError> {
        let mut contents = String::new();
        self.reader.read_to_string(&mut contents)?;
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_all_returns_everything_until_eof() {
        let data = b"{\"line\": 1}\n{\"line\": 2}\n";
        let source = StdinSource::from_reader(&data[..]);
        assert_eq!(source.read_all().unwrap(), "{\"line\": 1}\n{\"line\": 2}\n");
    }

    #[test]
    fn read_all_keeps_unterminated_last_line() {
        let data = b"{\"line\": 1}";
        let source = StdinSource::from_reader(&data[..]);
        assert_eq!(source.read_all().unwrap(), "{\"line\": 1}");
    }

    #[test]
    fn read_all_rejects_invalid_utf8() {
        let data: &[u8] = &[0xff, 0xfe, b'\n'];
        let source = StdinSource::from_reader(data);
        assert!(matches!(source.read_all(), Err(InputError::Io(_))));
    }
}
