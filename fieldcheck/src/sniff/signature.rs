//! Static signature table.
//!
//! A [`FormatSignature`] is matched in four steps: minimum length, one of the
//! prefix alternatives at offset 0, every fixed-offset marker, then the
//! optional token whitelist and trailer rule. A format may appear more than
//! once when its files come in structurally different layouts (QuickTime).

use super::format::Format;

/// One position of a prefix pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Byte {
    Exact(u8),
    Any,
    OneOf(&'static [u8]),
    /// Inclusive range.
    Range(u8, u8),
}

impl Byte {
    #[must_use]
    pub fn matches(self, byte: u8) -> bool {
        match self {
            Self::Exact(expected) => byte == expected,
            Self::Any => true,
            Self::OneOf(set) => set.contains(&byte),
            Self::Range(lo, hi) => (lo..=hi).contains(&byte),
        }
    }
}

/// Exact bytes expected at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub offset: usize,
    pub token: &'static [u8],
}

/// The bytes at `offset` must equal one of `allowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet {
    pub offset: usize,
    pub allowed: &'static [&'static [u8]],
}

/// Structural check on the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    None,
    /// The buffer ends with this token.
    EndsWith(&'static [u8]),
    /// The token occurs somewhere after the matched prefix.
    Contains(&'static [u8]),
}

/// Detection rules for one format layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSignature {
    pub format: Format,
    /// Alternatives; one must match at offset 0.
    pub prefixes: &'static [&'static [Byte]],
    pub markers: &'static [Marker],
    pub tokens: Option<TokenSet>,
    pub trailer: Trailer,
    /// Shorter buffers never match.
    pub min_len: usize,
}

impl FormatSignature {
    /// Whether `buf` satisfies every rule of this signature.
    #[must_use]
    pub fn matches(&self, buf: &[u8]) -> bool {
        if buf.len() < self.min_len {
            return false;
        }
        let Some(prefix_len) = self
            .prefixes
            .iter()
            .find_map(|prefix| prefix_matches(prefix, buf).then_some(prefix.len()))
        else {
            return false;
        };
        if !self
            .markers
            .iter()
            .all(|marker| token_at(buf, marker.offset, marker.token))
        {
            return false;
        }
        if let Some(tokens) = self.tokens
            && !tokens
                .allowed
                .iter()
                .any(|token| token_at(buf, tokens.offset, token))
        {
            return false;
        }
        match self.trailer {
            Trailer::None => true,
            Trailer::EndsWith(token) => buf.ends_with(token),
            Trailer::Contains(token) => contains(&buf[prefix_len..], token),
        }
    }
}

fn prefix_matches(prefix: &[Byte], buf: &[u8]) -> bool {
    buf.len() >= prefix.len()
        && prefix
            .iter()
            .zip(buf)
            .all(|(expected, byte)| expected.matches(*byte))
}

fn token_at(buf: &[u8], offset: usize, token: &[u8]) -> bool {
    buf.get(offset..)
        .is_some_and(|rest| rest.starts_with(token))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Exact-match pattern from a byte string.
const fn lit<const N: usize>(bytes: &[u8; N]) -> [Byte; N] {
    let mut out = [Byte::Any; N];
    let mut i = 0;
    while i < N {
        out[i] = Byte::Exact(bytes[i]);
        i += 1;
    }
    out
}

/// An ISO base media / QuickTime box header: 4-byte size, then the box type.
const fn box_header(kind: &[u8; 4]) -> [Byte; 8] {
    [
        Byte::Any,
        Byte::Any,
        Byte::Any,
        Byte::Any,
        Byte::Exact(kind[0]),
        Byte::Exact(kind[1]),
        Byte::Exact(kind[2]),
        Byte::Exact(kind[3]),
    ]
}

/// SOI followed by the first segment marker (APPn, DQT, DHT, SOFn, COM, ...).
const JPEG_SOI: [Byte; 4] = [
    Byte::Exact(0xFF),
    Byte::Exact(0xD8),
    Byte::Exact(0xFF),
    Byte::Range(0xC0, 0xFE),
];
const PNG_MAGIC: [Byte; 8] = lit(b"\x89PNG\r\n\x1a\n");
const GIF_MAGIC: [Byte; 3] = lit(b"GIF");
const ICO_HEADER: [Byte; 6] = [
    Byte::Exact(0x00),
    Byte::Exact(0x00),
    Byte::Exact(0x01),
    Byte::Exact(0x00),
    Byte::Any,
    Byte::Any,
];
const ID3_TAG: [Byte; 3] = lit(b"ID3");
const MPEG_FRAME_SYNC: [Byte; 2] = [Byte::Exact(0xFF), Byte::OneOf(&[0xFB, 0xF3, 0xF2, 0xFA])];
const RIFF: [Byte; 4] = lit(b"RIFF");
const FLAC_MAGIC: [Byte; 4] = lit(b"fLaC");
const OGG_MAGIC: [Byte; 4] = lit(b"OggS");
const AMR_MAGIC: [Byte; 5] = lit(b"#!AMR");
const FTYP: [Byte; 8] = box_header(b"ftyp");
const MOOV: [Byte; 8] = box_header(b"moov");
const MDAT: [Byte; 8] = box_header(b"mdat");
const WIDE: [Byte; 8] = box_header(b"wide");
const FREE: [Byte; 8] = box_header(b"free");
const EBML_MAGIC: [Byte; 4] = lit(b"\x1a\x45\xdf\xa3");
const PDF_HEADER: [Byte; 8] = [
    Byte::Exact(b'%'),
    Byte::Exact(b'P'),
    Byte::Exact(b'D'),
    Byte::Exact(b'F'),
    Byte::Exact(b'-'),
    Byte::Range(b'1', b'2'),
    Byte::Exact(b'.'),
    Byte::Range(b'0', b'9'),
];

/// Length-13 `IHDR` chunk header directly after the PNG signature.
const PNG_IHDR: &[u8] = b"\x00\x00\x00\x0dIHDR";
/// Empty `IEND` chunk with its CRC.
const PNG_IEND: &[u8] = b"\x00\x00\x00\x00IEND\xae\x42\x60\x82";
/// Signature, `IHDR` chunk, `IEND` chunk.
const PNG_MIN_LEN: usize = 8 + 25 + 12;
/// Header, logical screen descriptor, trailer.
const GIF_MIN_LEN: usize = 6 + 7 + 1;

const MP4_BRANDS: &[&[u8]] = &[
    b"isom", b"iso2", b"iso5", b"iso6", b"mp41", b"mp42", b"avc1", b"dash", b"M4V ", b"mmp4",
];

/// Every known signature, in match order.
pub static SIGNATURES: &[FormatSignature] = &[
    FormatSignature {
        format: Format::Jpeg,
        prefixes: &[&JPEG_SOI],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 4,
    },
    FormatSignature {
        format: Format::Png,
        prefixes: &[&PNG_MAGIC],
        markers: &[Marker {
            offset: 8,
            token: PNG_IHDR,
        }],
        tokens: None,
        trailer: Trailer::EndsWith(PNG_IEND),
        min_len: PNG_MIN_LEN,
    },
    FormatSignature {
        format: Format::Gif,
        prefixes: &[&GIF_MAGIC],
        markers: &[],
        tokens: Some(TokenSet {
            offset: 3,
            allowed: &[b"87a", b"89a"],
        }),
        trailer: Trailer::EndsWith(b"\x3b"),
        min_len: GIF_MIN_LEN,
    },
    FormatSignature {
        format: Format::Ico,
        prefixes: &[&ICO_HEADER],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 6,
    },
    FormatSignature {
        format: Format::Mp3,
        prefixes: &[&ID3_TAG, &MPEG_FRAME_SYNC],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 3,
    },
    FormatSignature {
        format: Format::Wav,
        prefixes: &[&RIFF],
        markers: &[Marker {
            offset: 8,
            token: b"WAVE",
        }],
        tokens: None,
        trailer: Trailer::None,
        min_len: 12,
    },
    FormatSignature {
        format: Format::Flac,
        prefixes: &[&FLAC_MAGIC],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 4,
    },
    FormatSignature {
        format: Format::Ogg,
        prefixes: &[&OGG_MAGIC],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 4,
    },
    FormatSignature {
        format: Format::Amr,
        prefixes: &[&AMR_MAGIC],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 5,
    },
    FormatSignature {
        format: Format::M4a,
        prefixes: &[&FTYP],
        markers: &[],
        tokens: Some(TokenSet {
            offset: 8,
            allowed: &[b"M4A "],
        }),
        trailer: Trailer::None,
        min_len: 12,
    },
    FormatSignature {
        format: Format::Mp4,
        prefixes: &[&FTYP],
        markers: &[],
        tokens: Some(TokenSet {
            offset: 8,
            allowed: MP4_BRANDS,
        }),
        trailer: Trailer::None,
        min_len: 12,
    },
    FormatSignature {
        format: Format::Mov,
        prefixes: &[&FTYP],
        markers: &[],
        tokens: Some(TokenSet {
            offset: 8,
            allowed: &[b"qt  "],
        }),
        trailer: Trailer::None,
        min_len: 12,
    },
    // Classic QuickTime files without an ftyp box.
    FormatSignature {
        format: Format::Mov,
        prefixes: &[&MOOV, &MDAT, &WIDE, &FREE],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 8,
    },
    FormatSignature {
        format: Format::Mkv,
        prefixes: &[&EBML_MAGIC],
        markers: &[],
        tokens: None,
        trailer: Trailer::None,
        min_len: 4,
    },
    FormatSignature {
        format: Format::Avi,
        prefixes: &[&RIFF],
        markers: &[Marker {
            offset: 8,
            token: b"AVI ",
        }],
        tokens: None,
        trailer: Trailer::None,
        min_len: 12,
    },
    FormatSignature {
        format: Format::Pdf,
        prefixes: &[&PDF_HEADER],
        markers: &[],
        tokens: None,
        trailer: Trailer::Contains(b"%%EOF"),
        min_len: 8,
    },
];

/// Signatures of `format`, in table order.
pub fn signatures_for(format: Format) -> impl Iterator<Item = &'static FormatSignature> {
    SIGNATURES.iter().filter(move |sig| sig.format == format)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_has_a_signature() {
        for format in Format::ALL {
            assert!(
                signatures_for(format).next().is_some(),
                "no signature for {format}"
            );
        }
    }

    #[test]
    fn test_byte_patterns() {
        assert!(Byte::Exact(7).matches(7));
        assert!(!Byte::Exact(7).matches(8));
        assert!(Byte::Any.matches(0));
        assert!(Byte::OneOf(&[1, 2]).matches(2));
        assert!(!Byte::OneOf(&[1, 2]).matches(3));
        assert!(Byte::Range(b'1', b'2').matches(b'2'));
        assert!(!Byte::Range(b'1', b'2').matches(b'3'));
    }

    #[test]
    fn test_prefix_longer_than_buffer() {
        assert!(!prefix_matches(&PNG_MAGIC, b"\x89PNG"));
    }

    #[test]
    fn test_contains_searches_after_prefix() {
        let pdf = signatures_for(Format::Pdf).next().unwrap();
        assert!(pdf.matches(b"%PDF-1.7\n1 0 obj\n%%EOF"));
        // The trailer token inside the header itself does not count.
        assert!(!pdf.matches(b"%PDF-1.7"));
        assert!(!pdf.matches(b"%PDF-3.0\n%%EOF"));
    }

    #[test]
    fn test_quicktime_layouts() {
        let mut ftyp = b"\x00\x00\x00\x14ftypqt  ".to_vec();
        ftyp.extend_from_slice(&[0; 8]);
        let moov = b"\x00\x00\x00\x08moov";
        let matched = |buf: &[u8]| signatures_for(Format::Mov).any(|sig| sig.matches(buf));
        assert!(matched(&ftyp));
        assert!(matched(moov));
        assert!(!matched(b"\x00\x00\x00\x08abcd"));
    }
}
