//! Person name and surname validation.
//!
//! Both validators share one slot layout and rule sequence; they differ only in
//! wording and in the default maximum length.

use serde::Deserialize;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, LengthBounds, RuleSet, is_blank};

/// Default messages of [`validate_name`], in slot order.
pub const NAME_DEFAULT_MESSAGES: [&str; 5] = [
    "Name cannot be empty",
    "Name cannot contain numbers",
    "Name cannot contain special characters",
    "This name is not valid",
    "Name too big, try again",
];

/// Default messages of [`validate_surname`], in slot order.
pub const SURNAME_DEFAULT_MESSAGES: [&str; 5] = [
    "Surname cannot be empty",
    "Surname cannot contain numbers",
    "Surname cannot contain special characters",
    "This surname is not valid",
    "Surname too big, try again",
];

/// Default minimum length for names and surnames.
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Default maximum length for names.
pub const NAME_DEFAULT_MAX_LENGTH: usize = 20;

/// Default maximum length for surnames.
pub const SURNAME_DEFAULT_MAX_LENGTH: usize = 25;

/// Failure slots of the name and surname validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSlot {
    /// Empty or blank input.
    Empty,
    /// Contains a numeric character.
    ContainsDigit,
    /// Contains a character outside letters, digits, `_` and whitespace.
    SpecialCharacter,
    /// Too short, a single repeated character, or a run of three identical characters.
    NotValid,
    /// Longer than the maximum length.
    TooLong,
}

impl Slot for NameSlot {
    const ALL: &'static [Self] = &[
        Self::Empty,
        Self::ContainsDigit,
        Self::SpecialCharacter,
        Self::NotValid,
        Self::TooLong,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Options shared by [`validate_name`] and [`validate_surname`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NameOptions {
    /// Minimum length in characters (default: 1).
    pub min_length: Option<usize>,
    /// Maximum length in characters (default: 20 for names, 25 for surnames).
    pub max_length: Option<usize>,
    /// Message overrides.
    #[serde(alias = "errorMsg")]
    pub messages: Messages<NameSlot>,
    /// Extra check run after the built-in rules pass.
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

struct PersonKind {
    noun: &'static str,
    defaults: &'static [&'static str],
    default_max: usize,
}

const NAME: PersonKind = PersonKind {
    noun: "Name",
    defaults: &NAME_DEFAULT_MESSAGES,
    default_max: NAME_DEFAULT_MAX_LENGTH,
};

const SURNAME: PersonKind = PersonKind {
    noun: "Surname",
    defaults: &SURNAME_DEFAULT_MESSAGES,
    default_max: SURNAME_DEFAULT_MAX_LENGTH,
};

/// Validate a first name.
///
/// Rules, in order: not blank, at most `max_length`, at least `min_length`,
/// no digits, only word and space characters, not one repeated character,
/// no run of three identical word characters.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if a length bound is zero or
/// `min_length > max_length`.
pub fn validate_name(
    name: &str,
    options: &NameOptions,
) -> Result<ValidationResult, ContractViolation> {
    validate_person(name, options, &NAME)
}

/// Validate a surname. Same rules as [`validate_name`] with surname wording.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if a length bound is zero or
/// `min_length > max_length`.
pub fn validate_surname(
    surname: &str,
    options: &NameOptions,
) -> Result<ValidationResult, ContractViolation> {
    validate_person(surname, options, &SURNAME)
}

fn validate_person(
    value: &str,
    options: &NameOptions,
    kind: &PersonKind,
) -> Result<ValidationResult, ContractViolation> {
    let bounds = LengthBounds::resolve(
        options.min_length,
        options.max_length,
        DEFAULT_MIN_LENGTH,
        Some(kind.default_max),
    )?;

    let rules = RuleSet::new()
        .rule("not_blank", NameSlot::Empty, |v| !is_blank(v))
        .rule("max_length", NameSlot::TooLong, |v| !bounds.exceeds_max(v))
        .rule("min_length", NameSlot::NotValid, |v| !bounds.below_min(v))
        .rule("no_digits", NameSlot::ContainsDigit, |v| {
            !v.chars().any(char::is_numeric)
        })
        .rule("word_or_space_only", NameSlot::SpecialCharacter, |v| {
            v.chars().all(|c| is_word_char(c) || c.is_whitespace())
        })
        .rule("not_single_repeated", NameSlot::NotValid, |v| {
            !is_single_repeated(v)
        })
        .rule("no_triple_run", NameSlot::NotValid, |v| !has_triple_run(v));

    Ok(rules.evaluate(value, options.custom.as_ref(), |slot| {
        options.messages.resolve(slot, kind.defaults, |slot| {
            (slot == NameSlot::TooLong)
                .then_some(bounds.max)
                .flatten()
                .map(|max| format!("{} cannot be greater than {max} characters", kind.noun))
        })
    }))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Every character is the same one.
fn is_single_repeated(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| chars.all(|c| c == first))
}

/// Three identical consecutive word characters.
fn has_triple_run(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars
        .windows(3)
        .any(|w| is_word_char(w[0]) && w[0] == w[1] && w[1] == w[2])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn name(value: &str) -> ValidationResult {
        validate_name(value, &NameOptions::default()).unwrap()
    }

    fn message(result: &ValidationResult) -> &str {
        result.message().unwrap_or("<valid>")
    }

    #[test]
    fn test_default_table_matches_slots() {
        assert_eq!(NAME_DEFAULT_MESSAGES.len(), NameSlot::ALL.len());
        assert_eq!(SURNAME_DEFAULT_MESSAGES.len(), NameSlot::ALL.len());
    }

    #[test]
    fn test_valid_names() {
        for value in ["John", "Mary Ann", "Jos\u{e9}", "Anna_Lee"] {
            assert!(name(value).is_valid(), "should accept {value}");
        }
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(message(&name("")), "Name cannot be empty");
        assert_eq!(message(&name("   ")), "Name cannot be empty");
    }

    #[test]
    fn test_digit_rule() {
        assert_eq!(message(&name("John1")), "Name cannot contain numbers");
    }

    #[test]
    fn test_special_character_rule() {
        assert_eq!(
            message(&name("John!")),
            "Name cannot contain special characters"
        );
        assert_eq!(
            message(&name("Mary-Jane")),
            "Name cannot contain special characters"
        );
    }

    #[test]
    fn test_repeated_character_rules() {
        assert_eq!(message(&name("aaa")), "This name is not valid");
        assert_eq!(message(&name("Z")), "This name is not valid");
        assert_eq!(message(&name("Joooohn")), "This name is not valid");
        // A run of spaces is not a run of word characters.
        assert!(name("Ann   Lee").is_valid());
    }

    #[test]
    fn test_too_long_is_templated() {
        let result = name(&"Ab".repeat(11));
        assert_eq!(message(&result), "Name cannot be greater than 20 characters");
    }

    #[test]
    fn test_too_short_uses_not_valid_slot() {
        let options = NameOptions {
            min_length: Some(4),
            ..NameOptions::default()
        };
        let result = validate_name("Bob", &options).unwrap();
        assert_eq!(message(&result), "This name is not valid");
    }

    #[test]
    fn test_surname_wording_and_default_max() {
        let options = NameOptions::default();
        let result = validate_surname("", &options).unwrap();
        assert_eq!(message(&result), "Surname cannot be empty");

        // 22 characters: too long for a name, fine for a surname.
        let value = "Ab".repeat(11);
        assert!(!validate_name(&value, &options).unwrap().is_valid());
        assert!(validate_surname(&value, &options).unwrap().is_valid());

        let result = validate_surname(&"Ab".repeat(13), &options).unwrap();
        assert_eq!(
            message(&result),
            "Surname cannot be greater than 25 characters"
        );
    }

    #[test]
    fn test_override_messages() {
        let options = NameOptions {
            messages: Messages::new().with(NameSlot::ContainsDigit, "No numbers please"),
            ..NameOptions::default()
        };
        let result = validate_name("R2D2", &options).unwrap();
        assert_eq!(message(&result), "No numbers please");

        // Unset slots keep their defaults.
        let result = validate_name("", &options).unwrap();
        assert_eq!(message(&result), "Name cannot be empty");
    }

    #[test]
    fn test_contract_violations() {
        let options = NameOptions {
            min_length: Some(10),
            max_length: Some(5),
            ..NameOptions::default()
        };
        assert_eq!(
            validate_name("John", &options).unwrap_err(),
            ContractViolation::InvertedBounds { min: 10, max: 5 }
        );

        let options = NameOptions {
            max_length: Some(0),
            ..NameOptions::default()
        };
        assert!(validate_name("John", &options).is_err());
    }

    #[test]
    fn test_deserialize_options() {
        let options: NameOptions = serde_json::from_str(
            r#"{"minLength": 2, "maxLength": 10, "errorMsg": [null, "digits!"]}"#,
        )
        .unwrap();
        assert_eq!(options.min_length, Some(2));
        assert_eq!(options.max_length, Some(10));
        assert_eq!(options.messages.get(NameSlot::ContainsDigit), Some("digits!"));
    }
}
