//! File discovery and bounded reads for `fieldcheck sniff`.
//!
//! - Symlinks are not followed unless `follow_links` is set
//! - Resolved paths must stay under the root they were found from
//! - Device files, pipes and sockets are skipped
//! - Reads stop one byte past `max_file_size`

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// `true` if the entry should be walked (is not a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && entry.depth() > 0
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

#[cfg(unix)]
fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().map(|m| m.file_type()).is_ok_and(|ft| {
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &walkdir::DirEntry) -> bool {
    false
}

/// Find every file under the configured paths.
///
/// Returns `(files, scan_errors)`. Walk errors, boundary violations and bad
/// exclude patterns end up in `scan_errors`; none are dropped.
#[must_use]
pub fn find_files(config: &ScanConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => scan_errors.push(ScanError::new(
                pat_str,
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }

    for root in &config.paths {
        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                scan_errors.push(ScanError::new(
                    root.clone(),
                    ScanErrorKind::IoError,
                    format!("Failed to resolve path: {e}"),
                ));
                continue;
            }
        };

        if root.is_file() {
            if !matches_exclude(root, &exclude_patterns) {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            scan_errors.push(ScanError::new(
                root.clone(),
                ScanErrorKind::IoError,
                "Not a regular file or directory",
            ));
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError::new(
                        path,
                        ScanErrorKind::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !file_path.is_file() || is_special_file(&entry) {
                continue;
            }

            match file_path.canonicalize() {
                Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::OutsideRoot,
                        format!(
                            "Path resolves outside scan root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    ));
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::IoError,
                        format!("Failed to resolve path: {e}"),
                    ));
                    continue;
                }
            }

            if matches_exclude(file_path, &exclude_patterns) {
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(
        files = files.len(),
        errors = scan_errors.len(),
        "file discovery finished"
    );
    (files, scan_errors)
}

/// Read a whole file, refusing anything over `max_file_size` bytes.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or read, or is too
/// large.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<Vec<u8>, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(path, ScanErrorKind::IoError, format!("Failed to open file: {e}"))
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(path, ScanErrorKind::IoError, format!("Failed to read file: {e}"))
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }
    Ok(buffer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_for(dir: &Path) -> ScanConfig {
        ScanConfig::with_paths(vec![dir.to_path_buf()])
    }

    #[test]
    fn test_find_files_sorted_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.gif"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::write(dir.path().join("node_modules/c.png"), b"x").unwrap();

        let (files, errors) = find_files(&config_for(dir.path()));
        assert!(errors.is_empty(), "got: {errors:?}");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.gif", "b.png"]);
    }

    #[test]
    fn test_find_files_exclude_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keep.png"), b"x").unwrap();
        std::fs::write(dir.path().join("skip.tmp"), b"x").unwrap();

        let mut config = config_for(dir.path());
        config.exclude = vec!["*.tmp".to_owned()];
        let (files, errors) = find_files(&config);
        assert!(errors.is_empty());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.png"));
    }

    #[test]
    fn test_find_files_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.exclude = vec!["[".to_owned()];
        let (_, errors) = find_files(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ScanErrorKind::InvalidExcludePattern);
    }

    #[test]
    fn test_find_files_missing_root() {
        let config = ScanConfig::with_paths(vec![PathBuf::from("/nonexistent/fieldcheck")]);
        let (files, errors) = find_files(&config);
        assert!(files.is_empty());
        assert_eq!(errors[0].kind, ScanErrorKind::IoError);
    }

    #[test]
    fn test_find_files_single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.pdf");
        std::fs::write(&path, b"x").unwrap();
        let (files, errors) = find_files(&ScanConfig::with_paths(vec![path.clone()]));
        assert!(errors.is_empty());
        assert_eq!(files, vec![path]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_reported_when_following() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.png"), b"x").unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.png"), dir.path().join("link.png"))
            .unwrap();

        let mut config = config_for(dir.path());
        config.follow_links = true;
        let (files, errors) = find_files(&config);
        assert!(files.is_empty());
        assert_eq!(errors[0].kind, ScanErrorKind::OutsideRoot);
    }

    #[test]
    fn test_read_file_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        assert_eq!(read_file_bounded(&path, 4).unwrap(), vec![0, 1, 2, 3]);
        let err = read_file_bounded(&path, 3).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::FileTooLarge);
        let err = read_file_bounded(&dir.path().join("missing"), 3).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::IoError);
    }
}
