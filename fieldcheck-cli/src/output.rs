//! JSON and plain-text rendering of reports.

use std::io::Write;

use serde::Serialize;

use crate::report::{CheckReport, SniffReport};

/// Write any report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<R: Serialize>(report: &R, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write a [`CheckReport`] as plain text, one line per value.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_check_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for entry in &report.results {
        match entry.result.message() {
            None => writeln!(writer, "\u{2713} {}", entry.value)?,
            Some(message) => writeln!(writer, "\u{2717} {}: {message}", entry.value)?,
        }
    }
    if report.ok {
        writeln!(
            writer,
            "All {} value(s) passed the {} validator",
            report.results.len(),
            report.validator
        )?;
    } else {
        writeln!(
            writer,
            "{} of {} value(s) failed the {} validator",
            report.invalid_count(),
            report.results.len(),
            report.validator
        )?;
    }
    Ok(())
}

/// Write a [`SniffReport`] as a plain-text summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_sniff_human(report: &SniffReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  FIELDCHECK SNIFF ({})", report.kind.to_uppercase())?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Rejected:       {}", report.rejected_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be sniffed)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.results.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FILES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for entry in &report.results {
            let file = entry.file.display();
            match (entry.result.message(), entry.format) {
                (Some(message), _) => writeln!(writer, "\u{2717} {file}: {message}")?,
                (None, Some(format)) => writeln!(writer, "\u{2713} {file} ({format})")?,
                (None, None) => writeln!(writer, "\u{2713} {file}")?,
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} file(s) are valid {}",
            report.scanned_files, report.kind
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be sniffed",
                report.failed_files
            )?;
        }
        if report.rejected_count() > 0 {
            writeln!(
                writer,
                "\u{2717} {} file(s) are not valid {}",
                report.rejected_count(),
                report.kind
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use fieldcheck::{Format, ValidationResult};

    use super::*;
    use crate::error::{ScanError, ScanErrorKind};
    use crate::report::{CheckEntry, SniffEntry};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_check_human() {
        let report = CheckReport::new(
            "phone",
            vec![
                CheckEntry {
                    value: "(555) 123-4567".to_owned(),
                    result: ValidationResult::Valid,
                },
                CheckEntry {
                    value: "555".to_owned(),
                    result: ValidationResult::invalid("Invalid phone number"),
                },
            ],
        );
        let text = render(|buf| write_check_human(&report, buf));
        assert!(text.contains("\u{2713} (555) 123-4567"));
        assert!(text.contains("\u{2717} 555: Invalid phone number"));
        assert!(text.contains("1 of 2 value(s) failed the phone validator"));
    }

    #[test]
    fn test_sniff_human_lists_scan_errors() {
        let report = SniffReport::new(
            "image",
            vec![SniffEntry {
                file: PathBuf::from("ok.png"),
                format: Some(Format::Png),
                result: ValidationResult::Valid,
            }],
            vec![ScanError::new(
                "big.png",
                ScanErrorKind::FileTooLarge,
                "File exceeds maximum size of 1 bytes",
            )],
        );
        let text = render(|buf| write_sniff_human(&report, buf));
        assert!(text.contains("FIELDCHECK SNIFF (IMAGE)"));
        assert!(text.contains("big.png: [scan error] File exceeds maximum size of 1 bytes"));
        assert!(text.contains("\u{2713} ok.png (png)"));
        assert!(text.contains("\u{2717} 1 file(s) could not be sniffed"));
    }

    #[test]
    fn test_json_report() {
        let report = CheckReport::new("name", vec![]);
        let text = render(|buf| write_json(&report, buf));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["validator"], "name");
        assert_eq!(value["ok"], true);
    }
}
