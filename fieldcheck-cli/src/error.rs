//! Per-file scan failures.

use std::path::PathBuf;

use serde::Serialize;

/// Why a file could not be sniffed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// Opening or reading the file failed.
    IoError,
    /// The file exceeded `max_file_size`.
    FileTooLarge,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
    /// `max_files` was reached and the scan was truncated.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, ...).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be sniffed at all.
///
/// Unlike a rejected buffer, this means no verdict was produced for the file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be sniffed.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            message: message.into(),
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_human_readable() {
        let err = ScanError::new(
            "media/clip.mp4",
            ScanErrorKind::FileTooLarge,
            "File exceeds maximum size of 10 bytes",
        );
        assert_eq!(
            err.format_human_readable(),
            "media/clip.mp4: [scan error] File exceeds maximum size of 10 bytes"
        );
    }
}
