//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fieldcheck::{CharClass, ExclusionSet};

/// Validate field values and sniff file formats.
#[derive(Debug, Parser)]
#[command(name = "fieldcheck", version, about)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Without it,
    /// `FIELDCHECK_LOG` is honored.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a string validator over one or more values.
    Check(CheckArgs),
    /// Check that files are of the expected kind.
    Sniff(SniffArgs),
}

/// String validators reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Validator {
    Name,
    Surname,
    Username,
    Email,
    Phone,
    Password,
    Textarea,
}

impl Validator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::Textarea => "textarea",
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Which validator to run.
    #[arg(value_enum)]
    pub validator: Validator,

    /// Values to validate.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Options file (JSON, or YAML by `.yaml`/`.yml` extension). Flags
    /// override values from the file.
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Minimum length in characters.
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum length in characters.
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Country code the email must end with (email only).
    #[arg(long)]
    pub country: Option<String>,

    /// Allowed email domain suffixes, comma separated (email only).
    #[arg(long, value_delimiter = ',', conflicts_with = "default_domains")]
    pub domains: Vec<String>,

    /// Only accept the built-in list of public email providers (email only).
    #[arg(long)]
    pub default_domains: bool,

    /// Phone format template, `#` for one digit (phone only).
    #[arg(long, value_name = "PATTERN")]
    pub format: Option<String>,

    /// Required character classes, comma separated (password only).
    #[arg(long, value_delimiter = ',', value_name = "CLASS")]
    pub require: Vec<CharClass>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// File kinds the sniffer can confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SniffKind {
    Image,
    Audio,
    Video,
    Pdf,
    Txt,
}

impl SniffKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }
}

#[derive(Debug, Args)]
pub struct SniffArgs {
    /// Expected kind of file.
    #[arg(value_enum)]
    pub kind: SniffKind,

    /// Files or directories to check.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Format tags to reject, comma separated (e.g. `gif,jpg`).
    #[arg(long, value_name = "TAGS")]
    pub exclude: Option<ExclusionSet>,

    /// Options file with an `exclude` list (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Skip paths matching this glob (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude_path: Vec<String>,

    /// Follow symbolic links while walking directories.
    #[arg(long)]
    pub follow_links: bool,

    /// Refuse files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Maximum directory depth.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}
