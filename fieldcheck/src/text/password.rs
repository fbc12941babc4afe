//! Password rules and strength scoring.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, LengthBounds, RuleSet, char_len, is_blank};

/// Default messages of [`validate_password`], in slot order.
pub const PASSWORD_DEFAULT_MESSAGES: [&str; 8] = [
    "Password cannot be empty",
    "password too short",
    "This password is too long",
    "Requires at least one letter",
    "Requires at least one uppercase letter",
    "Requires at least one lowercase letter",
    "Requires at least one number",
    "Requires at least one special character",
];

/// Failure slots of [`validate_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordSlot {
    Empty,
    TooShort,
    TooLong,
    MissingLetter,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecial,
}

impl Slot for PasswordSlot {
    const ALL: &'static [Self] = &[
        Self::Empty,
        Self::TooShort,
        Self::TooLong,
        Self::MissingLetter,
        Self::MissingUppercase,
        Self::MissingLowercase,
        Self::MissingDigit,
        Self::MissingSpecial,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A character class a password can be required to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Letter,
    Uppercase,
    Lowercase,
    Digit,
    /// Anything that is neither alphanumeric nor whitespace.
    Special,
}

impl CharClass {
    /// Checked in this order.
    pub const ALL: [Self; 5] = [
        Self::Letter,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
    ];

    /// Whether `c` belongs to this class.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Letter => c.is_alphabetic(),
            Self::Uppercase => c.is_uppercase(),
            Self::Lowercase => c.is_lowercase(),
            Self::Digit => c.is_numeric(),
            Self::Special => !c.is_alphanumeric() && !c.is_whitespace(),
        }
    }

    /// Whether any character of `value` belongs to this class.
    #[must_use]
    pub fn present_in(self, value: &str) -> bool {
        value.chars().any(|c| self.contains(c))
    }

    fn slot(self) -> PasswordSlot {
        match self {
            Self::Letter => PasswordSlot::MissingLetter,
            Self::Uppercase => PasswordSlot::MissingUppercase,
            Self::Lowercase => PasswordSlot::MissingLowercase,
            Self::Digit => PasswordSlot::MissingDigit,
            Self::Special => PasswordSlot::MissingSpecial,
        }
    }

    fn rule_name(self) -> &'static str {
        match self {
            Self::Letter => "has_letter",
            Self::Uppercase => "has_uppercase",
            Self::Lowercase => "has_lowercase",
            Self::Digit => "has_digit",
            Self::Special => "has_special",
        }
    }
}

/// A name that is not a [`CharClass`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character class '{0}' (expected letter, uppercase, lowercase, digit or special)")]
pub struct UnknownCharClass(pub String);

impl FromStr for CharClass {
    type Err = UnknownCharClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "uppercase" | "upper" => Ok(Self::Uppercase),
            "lowercase" | "lower" => Ok(Self::Lowercase),
            "digit" | "number" => Ok(Self::Digit),
            "special" => Ok(Self::Special),
            _ => Err(UnknownCharClass(s.to_owned())),
        }
    }
}

/// Options of [`validate_password`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PasswordOptions {
    /// Minimum length in characters (default: 1).
    pub min_length: Option<usize>,
    /// Maximum length in characters (default: unbounded).
    pub max_length: Option<usize>,
    /// Character classes that must appear (default: none).
    pub require: Vec<CharClass>,
    #[serde(alias = "errorMsg")]
    pub messages: Messages<PasswordSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// Validate a password.
///
/// Rules, in order: not blank, at most `max_length`, at least `min_length`,
/// then each required class in [`CharClass::ALL`] order.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if a length bound is zero or
/// `min_length > max_length`.
pub fn validate_password(
    password: &str,
    options: &PasswordOptions,
) -> Result<ValidationResult, ContractViolation> {
    let bounds = LengthBounds::resolve(options.min_length, options.max_length, 1, None)?;

    let mut rules = RuleSet::new()
        .rule("not_blank", PasswordSlot::Empty, |v| !is_blank(v))
        .rule("max_length", PasswordSlot::TooLong, |v| {
            !bounds.exceeds_max(v)
        })
        .rule("min_length", PasswordSlot::TooShort, |v| {
            !bounds.below_min(v)
        });
    for class in CharClass::ALL {
        rules = rules.rule_if(
            options.require.contains(&class),
            class.rule_name(),
            class.slot(),
            move |v| class.present_in(v),
        );
    }

    Ok(rules.evaluate(password, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &PASSWORD_DEFAULT_MESSAGES, |slot| match slot {
                PasswordSlot::TooShort => Some(format!(
                    "Password must be at least {} characters",
                    bounds.min
                )),
                PasswordSlot::TooLong => bounds
                    .max
                    .map(|max| format!("Password cannot be greater than {max} characters")),
                _ => None,
            })
    }))
}

/// Coarse password strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

/// Passwords shorter than this are always [`PasswordStrength::VeryWeak`].
const STRENGTH_MIN_LENGTH: usize = 6;

/// Each length reached adds one point.
const STRENGTH_LENGTH_STEPS: [usize; 3] = [8, 12, 16];

/// Score a password from its length and character-class variety.
///
/// One point per class present among lowercase, uppercase, digit and special,
/// plus one point for each of 8, 12 and 16 characters reached.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = char_len(password);
    if len < STRENGTH_MIN_LENGTH {
        return PasswordStrength::VeryWeak;
    }

    let variety = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Special,
    ]
    .into_iter()
    .filter(|class| class.present_in(password))
    .count();
    let length_points = STRENGTH_LENGTH_STEPS
        .iter()
        .filter(|step| len >= **step)
        .count();

    match variety + length_points {
        0 => PasswordStrength::VeryWeak,
        1 | 2 => PasswordStrength::Weak,
        3 | 4 => PasswordStrength::Medium,
        5 => PasswordStrength::Strong,
        _ => PasswordStrength::VeryStrong,
    }
}
