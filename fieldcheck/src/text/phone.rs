//! Phone number validation against a `#`-placeholder format template.

use regex::Regex;
use serde::Deserialize;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, RuleSet, is_blank};

/// Default messages of [`validate_phone`], in slot order.
pub const PHONE_DEFAULT_MESSAGES: [&str; 2] = ["Phone number cannot be empty", "Invalid phone number"];

/// Default format: `#` is one ASCII digit, everything else is literal.
pub const PHONE_DEFAULT_FORMAT: &str = "(###) ###-####";

/// Failure slots of [`validate_phone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneSlot {
    Empty,
    Invalid,
}

impl Slot for PhoneSlot {
    const ALL: &'static [Self] = &[Self::Empty, Self::Invalid];

    fn index(self) -> usize {
        self as usize
    }
}

/// Options of [`validate_phone`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PhoneOptions {
    /// Format template (default: `(###) ###-####`).
    pub format: Option<String>,
    #[serde(alias = "errorMsg")]
    pub messages: Messages<PhoneSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// A compiled format template.
#[derive(Debug)]
struct PhoneFormat {
    pattern: Regex,
}

impl PhoneFormat {
    fn compile(template: &str) -> Result<Self, ContractViolation> {
        let invalid = |cause: &str| ContractViolation::InvalidPhoneFormat {
            format: template.to_owned(),
            cause: cause.to_owned(),
        };
        if template.is_empty() {
            return Err(invalid("format must not be empty"));
        }
        if !template.contains('#') {
            return Err(invalid("format must contain at least one '#' digit placeholder"));
        }

        let mut pattern = String::from("^");
        for c in template.chars() {
            if c == '#' {
                pattern.push_str("[0-9]");
            } else {
                pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|err| invalid(&err.to_string()))?;
        Ok(Self { pattern })
    }

    fn matches(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }
}

/// Validate a phone number.
///
/// Rules, in order: not blank, exact match of the format template.
///
/// # Errors
///
/// Returns [`ContractViolation::InvalidPhoneFormat`] if the format is empty
/// or has no `#` placeholder.
pub fn validate_phone(
    phone: &str,
    options: &PhoneOptions,
) -> Result<ValidationResult, ContractViolation> {
    let format = PhoneFormat::compile(options.format.as_deref().unwrap_or(PHONE_DEFAULT_FORMAT))?;

    let rules = RuleSet::new()
        .rule("not_blank", PhoneSlot::Empty, |v| !is_blank(v))
        .rule("phone_format", PhoneSlot::Invalid, |v| format.matches(v));

    Ok(rules.evaluate(phone, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &PHONE_DEFAULT_MESSAGES, |_| None)
    }))
}
