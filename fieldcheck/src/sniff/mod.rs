//! Binary file-signature sniffing.
//!
//! Detection is purely structural: leading magic bytes, fixed-offset markers
//! and trailers. Nothing is decoded, and any byte slice yields an answer.

pub mod format;
pub mod signature;
pub mod sniffer;
pub mod txt;

pub use format::{Family, Format, UnknownFormat};
pub use signature::{FormatSignature, SIGNATURES};
pub use sniffer::{
    ExclusionSet, SniffOptions, identify, is_valid_audio, is_valid_image, is_valid_pdf,
    is_valid_video, sniff,
};
pub use txt::is_valid_txt;
