//! Family-level detection over the signature table.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::format::{Family, Format, UnknownFormat};
use super::signature::SIGNATURES;
use crate::result::ValidationResult;

/// Formats a caller refuses even when the bytes match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<Format>);

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, format: Format) -> bool {
        self.0.contains(&format)
    }

    /// Add a format; returns `false` if it was already excluded.
    pub fn insert(&mut self, format: Format) -> bool {
        self.0.insert(format)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Format> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Format> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = Format>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parsed from a comma-separated tag list such as `"png,jpg"`.
impl FromStr for ExclusionSet {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|tag| !tag.trim().is_empty())
            .map(str::parse::<Format>)
            .collect()
    }
}

/// Options shared by the sniffing functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SniffOptions {
    /// Formats to reject.
    pub exclude: ExclusionSet,
}

impl SniffOptions {
    /// Options excluding the given formats.
    #[must_use]
    pub fn excluding(formats: impl IntoIterator<Item = Format>) -> Self {
        Self {
            exclude: formats.into_iter().collect(),
        }
    }
}

/// First format of `family` whose signature matches `buf` and which is not
/// excluded.
#[must_use]
pub fn identify(buf: &[u8], family: Family, options: &SniffOptions) -> Option<Format> {
    let format = SIGNATURES
        .iter()
        .filter(|sig| sig.format.family() == family && !options.exclude.contains(sig.format))
        .find(|sig| sig.matches(buf))
        .map(|sig| sig.format)?;
    tracing::debug!(%format, len = buf.len(), "signature matched");
    Some(format)
}

/// Whether `buf` is a JPEG, PNG, GIF or ICO image not in the exclusion list.
#[must_use]
pub fn is_valid_image(buf: &[u8], options: &SniffOptions) -> bool {
    identify(buf, Family::Image, options).is_some()
}

/// Whether `buf` is an MP3, WAV, FLAC, OGG, AMR or M4A stream not in the
/// exclusion list.
#[must_use]
pub fn is_valid_audio(buf: &[u8], options: &SniffOptions) -> bool {
    identify(buf, Family::Audio, options).is_some()
}

/// Whether `buf` is an MP4, MOV, MKV or AVI file not in the exclusion list.
#[must_use]
pub fn is_valid_video(buf: &[u8], options: &SniffOptions) -> bool {
    identify(buf, Family::Video, options).is_some()
}

/// Whether `buf` has a `%PDF-1.x`/`%PDF-2.x` header and an `%%EOF` marker,
/// unless PDF is in the exclusion list.
#[must_use]
pub fn is_valid_pdf(buf: &[u8], options: &SniffOptions) -> bool {
    identify(buf, Family::Document, options).is_some()
}

/// Like [`identify`], with a message explaining a rejection.
#[must_use]
pub fn sniff(buf: &[u8], family: Family, options: &SniffOptions) -> ValidationResult {
    if buf.is_empty() {
        return ValidationResult::invalid("File is empty");
    }
    if identify(buf, family, options).is_some() {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(format!("Not a valid {family} file"))
    }
}
