//! Free-text area validation.

use serde::Deserialize;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, LengthBounds, RuleSet, is_blank};

/// Default messages of [`validate_textarea`], in slot order.
pub const TEXTAREA_DEFAULT_MESSAGES: [&str; 2] = ["Textarea cannot be empty", "This textarea is too big"];

/// Default maximum length of a textarea.
pub const TEXTAREA_DEFAULT_MAX_LENGTH: usize = 50;

/// Failure slots of [`validate_textarea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextareaSlot {
    Empty,
    TooLong,
}

impl Slot for TextareaSlot {
    const ALL: &'static [Self] = &[Self::Empty, Self::TooLong];

    fn index(self) -> usize {
        self as usize
    }
}

/// Options of [`validate_textarea`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TextareaOptions {
    /// Maximum length in characters (default: 50).
    pub max_length: Option<usize>,
    #[serde(alias = "errorMsg")]
    pub messages: Messages<TextareaSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// Validate a free-text area: not blank and at most `max_length` characters.
///
/// # Errors
///
/// Returns [`ContractViolation::ZeroBound`] if `max_length` is zero.
pub fn validate_textarea(
    text: &str,
    options: &TextareaOptions,
) -> Result<ValidationResult, ContractViolation> {
    let bounds = LengthBounds::resolve(
        None,
        options.max_length,
        1,
        Some(TEXTAREA_DEFAULT_MAX_LENGTH),
    )?;

    let rules = RuleSet::new()
        .rule("not_blank", TextareaSlot::Empty, |v| !is_blank(v))
        .rule("max_length", TextareaSlot::TooLong, |v| {
            !bounds.exceeds_max(v)
        });

    Ok(rules.evaluate(text, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &TEXTAREA_DEFAULT_MESSAGES, |slot| {
                (slot == TextareaSlot::TooLong)
                    .then_some(bounds.max)
                    .flatten()
                    .map(|max| format!("Textarea cannot exceed {max} characters"))
            })
    }))
}
