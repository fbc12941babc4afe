//! Report types produced by the `check` and `sniff` commands.

use std::path::PathBuf;

use fieldcheck::{Format, ValidationResult};
use serde::Serialize;

use crate::error::ScanError;

/// Verdict for one value passed to `fieldcheck check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckEntry {
    pub value: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Result of a `fieldcheck check` run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Which validator ran.
    pub validator: &'static str,
    /// Whether every value passed.
    pub ok: bool,
    pub results: Vec<CheckEntry>,
}

impl CheckReport {
    #[must_use]
    pub fn new(validator: &'static str, results: Vec<CheckEntry>) -> Self {
        let ok = results.iter().all(|entry| entry.result.is_valid());
        Self {
            validator,
            ok,
            results,
        }
    }

    /// Number of values that failed validation.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.results
            .iter()
            .filter(|entry| !entry.result.is_valid())
            .count()
    }
}

/// Verdict for one sniffed file.
#[derive(Debug, Clone, Serialize)]
pub struct SniffEntry {
    pub file: PathBuf,
    /// The detected format, when the file was accepted by a signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Result of a `fieldcheck sniff` run.
///
/// A non-empty `scan_errors` means some files got no verdict at all; such a
/// report is never `ok`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct SniffReport {
    /// The expected kind of file.
    pub kind: &'static str,
    /// Number of files read and sniffed.
    pub scanned_files: usize,
    /// Number of files that could not be sniffed.
    pub failed_files: usize,
    /// Whether every scanned file matched AND no scan errors occurred.
    pub ok: bool,
    pub results: Vec<SniffEntry>,
    pub scan_errors: Vec<ScanError>,
}

impl SniffReport {
    #[must_use]
    pub fn new(kind: &'static str, results: Vec<SniffEntry>, scan_errors: Vec<ScanError>) -> Self {
        let ok = scan_errors.is_empty() && results.iter().all(|entry| entry.result.is_valid());
        Self {
            kind,
            scanned_files: results.len(),
            failed_files: scan_errors.len(),
            ok,
            results,
            scan_errors,
        }
    }

    /// Number of scanned files that were rejected.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.results
            .iter()
            .filter(|entry| !entry.result.is_valid())
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ScanErrorKind;

    #[test]
    fn test_check_entry_flattens_result() {
        let entry = CheckEntry {
            value: "12".to_owned(),
            result: ValidationResult::invalid("Username cannot contain only numbers"),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "value": "12",
                "valid": false,
                "message": "Username cannot contain only numbers",
            })
        );
    }

    #[test]
    fn test_sniff_report_ok_requires_no_scan_errors() {
        let entry = SniffEntry {
            file: PathBuf::from("a.png"),
            format: Some(Format::Png),
            result: ValidationResult::Valid,
        };
        let report = SniffReport::new("image", vec![entry.clone()], vec![]);
        assert!(report.ok);
        assert_eq!(report.scanned_files, 1);

        let error = ScanError::new("b.png", ScanErrorKind::IoError, "denied");
        let report = SniffReport::new("image", vec![entry], vec![error]);
        assert!(!report.ok);
        assert_eq!(report.failed_files, 1);
        assert_eq!(report.rejected_count(), 0);
    }

    #[test]
    fn test_sniff_entry_serializes_format_tag() {
        let entry = SniffEntry {
            file: PathBuf::from("a.jpg"),
            format: Some(Format::Jpeg),
            result: ValidationResult::Valid,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["format"], "jpeg");
        assert_eq!(value["valid"], true);
    }
}
