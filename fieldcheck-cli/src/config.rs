//! Filesystem scan configuration for `fieldcheck sniff`.

use std::path::PathBuf;

/// Where to look for files and how far to go.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Files or directories to sniff. Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the
    /// file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum number of files to sniff (default: `100_000`).
    pub max_files: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
        }
    }
}

impl ScanConfig {
    /// Defaults with the given roots.
    #[must_use]
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }
}
