//! # fieldcheck-cli
//!
//! Command line front end for [`fieldcheck`].
//!
//! - `fieldcheck check <validator> <values>...` runs a string validator.
//! - `fieldcheck sniff <kind> <paths>...` walks files and directories and
//!   checks each file's signature.
//!
//! Exit status is 0 when everything passed, 1 when some value or file was
//! rejected (or could not be read), and 2 on usage or option errors.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod output;
pub mod report;
pub mod scan;

use std::io::Write;

use fieldcheck::{Family, Format, SniffOptions, ValidationResult, identify, is_valid_txt, sniff};

pub use check::check_values;
pub use cli::{Cli, Command, SniffKind, Validator};
pub use config::ScanConfig;
pub use error::{ScanError, ScanErrorKind};
pub use report::{CheckEntry, CheckReport, SniffEntry, SniffReport};

use cli::SniffArgs;
use options::load_options;
use scan::{find_files, read_file_bounded};

/// Overall result of a command, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every value or file passed.
    Passed,
    /// At least one value or file was rejected or could not be read.
    Failed,
}

impl Outcome {
    #[must_use]
    pub fn from_ok(ok: bool) -> Self {
        if ok { Self::Passed } else { Self::Failed }
    }

    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

fn family_for(kind: SniffKind) -> Option<Family> {
    match kind {
        SniffKind::Image => Some(Family::Image),
        SniffKind::Audio => Some(Family::Audio),
        SniffKind::Video => Some(Family::Video),
        SniffKind::Pdf => Some(Family::Document),
        SniffKind::Txt => None,
    }
}

/// Verdict for one buffer.
fn sniff_buffer(
    buf: &[u8],
    kind: SniffKind,
    options: &SniffOptions,
) -> (Option<Format>, ValidationResult) {
    let Some(family) = family_for(kind) else {
        let result = if is_valid_txt(buf) {
            ValidationResult::Valid
        } else if buf.is_empty() {
            ValidationResult::invalid("File is empty")
        } else {
            ValidationResult::invalid("Not a valid text file")
        };
        return (None, result);
    };

    match identify(buf, family, options) {
        Some(format) => (Some(format), ValidationResult::Valid),
        None => (None, sniff(buf, family, options)),
    }
}

/// Sniff every file found under `config.paths`.
///
/// # Errors
///
/// Returns an error if `config.paths` is empty. Unreadable files, walk
/// failures and limits are reported in `report.scan_errors` instead.
pub fn sniff_fs(
    config: &ScanConfig,
    kind: SniffKind,
    options: &SniffOptions,
) -> anyhow::Result<SniffReport> {
    if config.paths.is_empty() {
        anyhow::bail!("No paths provided to sniff");
    }

    let (files, mut scan_errors) = find_files(config);
    let mut results = Vec::with_capacity(files.len());

    for file_path in &files {
        if results.len() + scan_errors.len() >= config.max_files {
            scan_errors.push(ScanError::new(
                file_path.clone(),
                ScanErrorKind::LimitExceeded,
                format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not sniffed",
                    config.max_files
                ),
            ));
            break;
        }

        let buf = match read_file_bounded(file_path, config.max_file_size) {
            Ok(buf) => buf,
            Err(e) => {
                tracing::warn!(file = %file_path.display(), "{}", e.message);
                scan_errors.push(e);
                continue;
            }
        };

        let (format, result) = sniff_buffer(&buf, kind, options);
        tracing::debug!(file = %file_path.display(), valid = result.is_valid(), "sniffed");
        results.push(SniffEntry {
            file: file_path.clone(),
            format,
            result,
        });
    }

    let report = SniffReport::new(kind.as_str(), results, scan_errors);
    tracing::info!(
        kind = report.kind,
        scanned = report.scanned_files,
        failed = report.failed_files,
        rejected = report.rejected_count(),
        "sniff finished"
    );
    Ok(report)
}

fn scan_config(args: &SniffArgs) -> ScanConfig {
    let mut config = ScanConfig::with_paths(args.paths.clone());
    config.exclude.clone_from(&args.exclude_path);
    config.follow_links = args.follow_links;
    if let Some(max_file_size) = args.max_file_size {
        config.max_file_size = max_file_size;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    config
}

fn sniff_options(args: &SniffArgs) -> anyhow::Result<SniffOptions> {
    let mut options = match &args.options {
        Some(path) => load_options::<SniffOptions>(path)?,
        None => SniffOptions::default(),
    };
    if let Some(exclude) = &args.exclude {
        options.exclude.clone_from(exclude);
    }
    Ok(options)
}

/// Run a parsed command line, writing the report to `writer`.
///
/// # Errors
///
/// Returns an error for unusable options (bad flags for the validator,
/// unreadable options files, contract violations) or if writing fails.
pub fn run(cli: &Cli, writer: &mut dyn Write) -> anyhow::Result<Outcome> {
    match &cli.command {
        Command::Check(args) => {
            let report = check_values(args)?;
            if args.json {
                output::write_json(&report, writer)?;
            } else {
                output::write_check_human(&report, writer)?;
            }
            Ok(Outcome::from_ok(report.ok))
        }
        Command::Sniff(args) => {
            let options = sniff_options(args)?;
            let report = sniff_fs(&scan_config(args), args.kind, &options)?;
            if args.json {
                output::write_json(&report, writer)?;
            } else {
                output::write_sniff_human(&report, writer)?;
            }
            Ok(Outcome::from_ok(report.ok))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_buffer_txt() {
        let options = SniffOptions::default();
        let (format, result) = sniff_buffer(b"hello\n", SniffKind::Txt, &options);
        assert_eq!(format, None);
        assert!(result.is_valid());
        let (_, result) = sniff_buffer(b"", SniffKind::Txt, &options);
        assert_eq!(result.message(), Some("File is empty"));
        let (_, result) = sniff_buffer(b"\x00\x01", SniffKind::Txt, &options);
        assert_eq!(result.message(), Some("Not a valid text file"));
    }

    #[test]
    fn test_sniff_buffer_reports_format() {
        let options = SniffOptions::default();
        let (format, result) = sniff_buffer(b"%PDF-1.7\n%%EOF", SniffKind::Pdf, &options);
        assert_eq!(format, Some(Format::Pdf));
        assert!(result.is_valid());
        let (format, result) = sniff_buffer(b"%PDF-1.7\n%%EOF", SniffKind::Image, &options);
        assert_eq!(format, None);
        assert_eq!(result.message(), Some("Not a valid image file"));
    }

    #[test]
    fn test_sniff_fs_requires_paths() {
        let err = sniff_fs(&ScanConfig::default(), SniffKind::Image, &SniffOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("No paths"), "got: {err}");
    }

    #[test]
    fn test_max_files_limit() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            std::fs::write(dir.path().join(name), b"hi").unwrap();
        }
        let mut config = ScanConfig::with_paths(vec![dir.path().to_path_buf()]);
        config.max_files = 2;
        let report = sniff_fs(&config, SniffKind::Txt, &SniffOptions::default()).unwrap();
        assert_eq!(report.scanned_files, 2);
        assert_eq!(report.scan_errors[0].kind, ScanErrorKind::LimitExceeded);
        assert!(!report.ok);
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::from_ok(true).exit_code(), 0);
        assert_eq!(Outcome::from_ok(false).exit_code(), 1);
    }
}
