//! File-based event source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

/// Events file named on the command line.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path the source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished since
    /// construction, `InputError::Io` for other I/O errors.
    pub fn read_all(&self) -> Result<String, InputError> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InputError::FileNotFound {
                path: self.path.clone(),
            },
            _ => InputError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn new_rejects_missing_file() {
        let result = FileSource::new("/nonexistent/path/events.jsonl");
        match result {
            Err(InputError::FileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/path/events.jsonl"));
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn read_all_returns_file_contents() {
        let test_file = std::env::temp_dir().join("daygrid_file_source_read_all.jsonl");
        fs::write(&test_file, "line one\nline two\n").unwrap();

        let source = FileSource::new(&test_file).unwrap();
        let contents = source.read_all();

        let _ = fs::remove_file(&test_file);

        assert_eq!(contents.unwrap(), "line one\nline two\n");
    }

    #[test]
    fn read_all_reports_file_deleted_after_open() {
        let test_file = std::env::temp_dir().join("daygrid_file_source_deleted.jsonl");
        fs::write(&test_file, "x\n").unwrap();

        let source = FileSource::new(&test_file).unwrap();
        fs::remove_file(&test_file).unwrap();

        assert!(matches!(
            source.read_all(),
            Err(InputError::FileNotFound { .. })
        ));
    }
}
