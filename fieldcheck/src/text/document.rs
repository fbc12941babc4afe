//! National document number validation.
//!
//! The checksum algorithms themselves (CPF, CNPJ, ...) live outside this
//! crate. Callers plug one in through [`DocumentCode`].

use serde::Deserialize;

use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, RuleSet, is_blank};

/// Default messages of [`validate_document`], in slot order.
pub const DOCUMENT_DEFAULT_MESSAGES: [&str; 2] = ["Document cannot be empty", "Invalid document"];

/// An opaque document-number checker.
pub trait DocumentCode {
    /// Whether `code` is a well-formed document number.
    fn is_valid(&self, code: &str) -> bool;
}

impl<F> DocumentCode for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, code: &str) -> bool {
        self(code)
    }
}

/// Failure slots of [`validate_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSlot {
    Empty,
    Invalid,
}

impl Slot for DocumentSlot {
    const ALL: &'static [Self] = &[Self::Empty, Self::Invalid];

    fn index(self) -> usize {
        self as usize
    }
}

/// Options of [`validate_document`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentOptions {
    #[serde(alias = "errorMsg")]
    pub messages: Messages<DocumentSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// Validate a document number with `checker`.
///
/// Surrounding whitespace is trimmed before the checker sees the code.
#[must_use]
pub fn validate_document<C>(code: &str, checker: &C, options: &DocumentOptions) -> ValidationResult
where
    C: DocumentCode + ?Sized,
{
    let rules = RuleSet::new()
        .rule("not_blank", DocumentSlot::Empty, |v| !is_blank(v))
        .rule("document_code", DocumentSlot::Invalid, |v| {
            checker.is_valid(v.trim())
        });

    rules.evaluate(code, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &DOCUMENT_DEFAULT_MESSAGES, |_| None)
    })
}
