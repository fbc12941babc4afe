//! Username validation.

use serde::Deserialize;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, LengthBounds, RuleSet, is_blank};

/// Default messages of [`validate_username`], in slot order.
pub const USERNAME_DEFAULT_MESSAGES: [&str; 7] = [
    "Username cannot be empty",
    "username too short",
    "This username is too long",
    "Username cannot contain spaces",
    "Cannot start with a number",
    "Cannot contain only numbers",
    "Username cannot contain multiple special characters",
];

/// Characters counted by the repeated-special rule.
pub const USERNAME_SPECIALS: &str = "!@#$%^&*()-_=+[]{}|\\;:'\",.<>/?";

/// How often one special character may appear.
const MAX_SPECIAL_REPEATS: usize = 2;

/// Failure slots of [`validate_username`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsernameSlot {
    Empty,
    TooShort,
    TooLong,
    ContainsSpace,
    StartsWithDigit,
    OnlyDigits,
    /// One special character appears more than twice.
    RepeatedSpecial,
}

impl Slot for UsernameSlot {
    const ALL: &'static [Self] = &[
        Self::Empty,
        Self::TooShort,
        Self::TooLong,
        Self::ContainsSpace,
        Self::StartsWithDigit,
        Self::OnlyDigits,
        Self::RepeatedSpecial,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Options of [`validate_username`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UsernameOptions {
    /// Minimum length in characters (default: 1).
    pub min_length: Option<usize>,
    /// Maximum length in characters (default: unbounded).
    pub max_length: Option<usize>,
    #[serde(alias = "errorMsg")]
    pub messages: Messages<UsernameSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// Validate a username.
///
/// Rules, in order: not blank, at most `max_length`, at least `min_length`,
/// no whitespace, not only digits, no leading digit, no special character
/// repeated more than twice.
///
/// Both length slots render `"Username must be between {min} and {max}
/// characters"` unless overridden.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if a length bound is zero or
/// `min_length > max_length`.
pub fn validate_username(
    username: &str,
    options: &UsernameOptions,
) -> Result<ValidationResult, ContractViolation> {
    let bounds = LengthBounds::resolve(options.min_length, options.max_length, 1, None)?;

    let rules = RuleSet::new()
        .rule("not_blank", UsernameSlot::Empty, |v| !is_blank(v))
        .rule("max_length", UsernameSlot::TooLong, |v| {
            !bounds.exceeds_max(v)
        })
        .rule("min_length", UsernameSlot::TooShort, |v| {
            !bounds.below_min(v)
        })
        .rule("no_whitespace", UsernameSlot::ContainsSpace, |v| {
            !v.chars().any(char::is_whitespace)
        })
        .rule("not_only_digits", UsernameSlot::OnlyDigits, |v| {
            !v.chars().all(|c| c.is_ascii_digit())
        })
        .rule("no_leading_digit", UsernameSlot::StartsWithDigit, |v| {
            !v.starts_with(|c: char| c.is_ascii_digit())
        })
        .rule("special_repeats", UsernameSlot::RepeatedSpecial, |v| {
            !has_repeated_special(v)
        });

    Ok(rules.evaluate(username, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &USERNAME_DEFAULT_MESSAGES, |slot| match slot {
                UsernameSlot::TooShort | UsernameSlot::TooLong => Some(bounds_message(bounds)),
                _ => None,
            })
    }))
}

fn bounds_message(bounds: LengthBounds) -> String {
    match bounds.max {
        Some(max) => format!(
            "Username must be between {} and {max} characters",
            bounds.min
        ),
        None => format!("Username must be at least {} characters", bounds.min),
    }
}

fn has_repeated_special(value: &str) -> bool {
    USERNAME_SPECIALS
        .chars()
        .any(|special| value.chars().filter(|c| *c == special).count() > MAX_SPECIAL_REPEATS)
}
