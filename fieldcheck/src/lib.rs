//! # fieldcheck
//!
//! Field-level input validators and binary format sniffers.
//!
//! Two families live here:
//!
//! - **String validators** ([`text`]): each takes a value and an options
//!   struct, checks the options, then runs an ordered rule list. The first
//!   failing rule decides the message, which callers can override per slot.
//! - **Signature sniffers** ([`sniff`]): each takes a byte buffer and answers
//!   whether it is a known image, audio, video, PDF or text file.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcheck::{UsernameOptions, validate_username};
//!
//! let options = UsernameOptions {
//!     min_length: Some(3),
//!     max_length: Some(25),
//!     ..UsernameOptions::default()
//! };
//!
//! let result = validate_username("Us", &options).unwrap();
//! assert_eq!(
//!     result.message(),
//!     Some("Username must be between 3 and 25 characters")
//! );
//! ```
//!
//! ```rust
//! use fieldcheck::{Format, SniffOptions, is_valid_image};
//!
//! let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00\x3b";
//! assert!(is_valid_image(gif, &SniffOptions::default()));
//! assert!(!is_valid_image(gif, &SniffOptions::excluding([Format::Gif])));
//! ```
//!
//! Options that a validator cannot honor (a zero bound, `min > max`, a bad
//! phone template) are reported as [`ContractViolation`] before the value is
//! looked at. Rejecting the value itself is never an error.

pub mod error;
pub mod messages;
pub mod predicates;
pub mod result;
pub mod rules;
pub mod sniff;
pub mod text;

pub use error::ContractViolation;
pub use messages::{Messages, Slot};
pub use result::ValidationResult;
pub use rules::{CustomCheck, LengthBounds};
pub use sniff::{
    ExclusionSet, Family, Format, SniffOptions, UnknownFormat, identify, is_valid_audio,
    is_valid_image, is_valid_pdf, is_valid_txt, is_valid_video, sniff,
};
pub use text::{
    CharClass, DocumentCode, DocumentOptions, DomainPolicy, EmailOptions, NameOptions,
    PasswordOptions, PasswordStrength, PhoneOptions, TextareaOptions, UsernameOptions,
    password_strength, validate_document, validate_email, validate_name, validate_password,
    validate_phone, validate_surname, validate_textarea, validate_username,
};
