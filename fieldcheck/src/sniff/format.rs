//! Format tags understood by the sniffer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A detectable file format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Gif,
    Ico,
    Mp3,
    Wav,
    Flac,
    Ogg,
    Amr,
    M4a,
    Mp4,
    Mov,
    Mkv,
    Avi,
    Pdf,
}

/// What kind of content a format carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Image,
    Audio,
    Video,
    Document,
}

impl Format {
    /// Every format, grouped by family.
    pub const ALL: [Self; 15] = [
        Self::Jpeg,
        Self::Png,
        Self::Gif,
        Self::Ico,
        Self::Mp3,
        Self::Wav,
        Self::Flac,
        Self::Ogg,
        Self::Amr,
        Self::M4a,
        Self::Mp4,
        Self::Mov,
        Self::Mkv,
        Self::Avi,
        Self::Pdf,
    ];

    /// Lowercase tag, as used in exclusion lists.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Ico => "ico",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Amr => "amr",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Avi => "avi",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub fn family(self) -> Family {
        match self {
            Self::Jpeg | Self::Png | Self::Gif | Self::Ico => Family::Image,
            Self::Mp3 | Self::Wav | Self::Flac | Self::Ogg | Self::Amr | Self::M4a => {
                Family::Audio
            }
            Self::Mp4 | Self::Mov | Self::Mkv | Self::Avi => Family::Video,
            Self::Pdf => Family::Document,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A tag that names no known format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format tag '{tag}'")]
pub struct UnknownFormat {
    /// The tag as given.
    pub tag: String,
}

impl FromStr for Format {
    type Err = UnknownFormat;

    /// Case-insensitive; `jpg` is accepted for [`Format::Jpeg`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "jpg" {
            return Ok(Self::Jpeg);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.tag() == lower)
            .ok_or_else(|| UnknownFormat { tag: s.to_owned() })
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
        })
    }
}
