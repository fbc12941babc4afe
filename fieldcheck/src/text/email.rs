//! Email address validation with optional domain allow-list and country suffix.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::ContractViolation;
use crate::messages::{Messages, Slot};
use crate::predicates::is_email;
use crate::result::ValidationResult;
use crate::rules::{CustomCheck, LengthBounds, RuleSet, is_blank};

/// Default messages of [`validate_email`], in slot order.
pub const EMAIL_DEFAULT_MESSAGES: [&str; 5] = [
    "Email cannot be empty",
    "This e-mail is not valid",
    "Email too big, try again",
    "This email is not valid in the country",
    "Email domain is not allowed.",
];

/// Default maximum length of an email address.
pub const EMAIL_DEFAULT_MAX_LENGTH: usize = 400;

/// Public providers accepted by [`DomainPolicy::Default`].
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 11] = [
    "@gmail.com",
    "@outlook.com",
    "@yahoo.com",
    "@icloud.com",
    "@hotmail.com",
    "@mail.ru",
    "@yandex.ru",
    "@gmx.com",
    "@zoho.com",
    "@protonmail.com",
    "@protonmail.ch",
];

/// Failure slots of [`validate_email`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailSlot {
    Empty,
    /// Not shaped like `local@domain.tld`.
    Invalid,
    TooLong,
    /// Missing the `.{country}` suffix.
    WrongCountry,
    /// Outside the allowed domains.
    DomainNotAllowed,
}

impl Slot for EmailSlot {
    const ALL: &'static [Self] = &[
        Self::Empty,
        Self::Invalid,
        Self::TooLong,
        Self::WrongCountry,
        Self::DomainNotAllowed,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Which domains an address may end with.
///
/// Deserializes from `false` ([`Any`](Self::Any)), `true`
/// ([`Default`](Self::Default)) or a list of suffixes ([`Only`](Self::Only)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "DomainPolicyRepr")]
pub enum DomainPolicy {
    /// No domain restriction.
    #[default]
    Any,
    /// Only [`DEFAULT_ALLOWED_DOMAINS`].
    Default,
    /// Only the given suffixes, such as `"@example.com"`. An empty list means
    /// [`DEFAULT_ALLOWED_DOMAINS`].
    Only(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DomainPolicyRepr {
    Flag(bool),
    List(Vec<String>),
}

impl From<DomainPolicyRepr> for DomainPolicy {
    fn from(repr: DomainPolicyRepr) -> Self {
        match repr {
            DomainPolicyRepr::Flag(false) => Self::Any,
            DomainPolicyRepr::Flag(true) => Self::Default,
            DomainPolicyRepr::List(list) => Self::Only(list),
        }
    }
}

impl DomainPolicy {
    /// Compile the policy into a case-insensitive suffix matcher.
    ///
    /// Returns `None` for [`DomainPolicy::Any`].
    fn compile(&self) -> Result<Option<Regex>, ContractViolation> {
        let domains: Vec<&str> = match self {
            Self::Any => return Ok(None),
            Self::Only(list) if !list.is_empty() => {
                if list.iter().any(|domain| domain.trim().is_empty()) {
                    return Err(ContractViolation::InvalidDomainList {
                        cause: "entries must not be empty".to_owned(),
                    });
                }
                list.iter().map(String::as_str).collect()
            }
            Self::Default | Self::Only(_) => DEFAULT_ALLOWED_DOMAINS.to_vec(),
        };

        let alternatives: Vec<String> = domains.into_iter().map(regex::escape).collect();
        let pattern = format!("(?:{})$", alternatives.join("|"));
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|err| ContractViolation::InvalidDomainList {
                cause: err.to_string(),
            })
    }
}

/// Options of [`validate_email`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EmailOptions {
    /// Maximum length in characters (default: 400).
    pub max_length: Option<usize>,
    /// Required country code; the address must end with `.{country}`. A
    /// blank code means no country check.
    pub country: Option<String>,
    /// Domain allow-list (default: any domain).
    pub valid_domains: DomainPolicy,
    #[serde(alias = "errorMsg")]
    pub messages: Messages<EmailSlot>,
    #[serde(skip)]
    pub custom: Option<CustomCheck>,
}

/// Validate an email address.
///
/// Rules, in order: not blank, domain allowed (when a policy is set), email
/// shape, at most `max_length`, ends with `.{country}` (when set, compared
/// case-sensitively).
///
/// # Errors
///
/// Returns a [`ContractViolation`] if `max_length` is zero or the domain
/// allow-list contains an empty entry.
pub fn validate_email(
    email: &str,
    options: &EmailOptions,
) -> Result<ValidationResult, ContractViolation> {
    let bounds = LengthBounds::resolve(None, options.max_length, 1, Some(EMAIL_DEFAULT_MAX_LENGTH))?;
    let allowed = options.valid_domains.compile()?;
    let country_suffix = options
        .country
        .as_deref()
        .map(str::trim)
        .filter(|country| !country.is_empty())
        .map(|country| format!(".{country}"));

    let rules = RuleSet::new()
        .rule("not_blank", EmailSlot::Empty, |v| !is_blank(v))
        .rule_if(
            allowed.is_some(),
            "allowed_domain",
            EmailSlot::DomainNotAllowed,
            |v| allowed.as_ref().is_none_or(|re| re.is_match(v)),
        )
        .rule("email_shape", EmailSlot::Invalid, is_email)
        .rule("max_length", EmailSlot::TooLong, |v| !bounds.exceeds_max(v))
        .rule_if(
            country_suffix.is_some(),
            "country_suffix",
            EmailSlot::WrongCountry,
            |v| country_suffix.as_deref().is_none_or(|suffix| v.ends_with(suffix)),
        );

    Ok(rules.evaluate(email, options.custom.as_ref(), |slot| {
        options
            .messages
            .resolve(slot, &EMAIL_DEFAULT_MESSAGES, |slot| {
                (slot == EmailSlot::TooLong)
                    .then_some(bounds.max)
                    .flatten()
                    .map(|max| format!("Email cannot be greater than {max} characters"))
            })
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn check(value: &str, options: &EmailOptions) -> ValidationResult {
        validate_email(value, options).unwrap()
    }

    fn with_policy(policy: DomainPolicy) -> EmailOptions {
        EmailOptions {
            valid_domains: policy,
            ..EmailOptions::default()
        }
    }

    #[test]
    fn test_default_table_matches_slots() {
        assert_eq!(EMAIL_DEFAULT_MESSAGES.len(), EmailSlot::ALL.len());
    }

    #[test]
    fn test_any_domain_by_default() {
        assert!(check("foo@bar.com", &EmailOptions::default()).is_valid());
    }

    #[test]
    fn test_empty() {
        let result = check("", &EmailOptions::default());
        assert_eq!(result.message(), Some("Email cannot be empty"));
    }

    #[test]
    fn test_default_domain_list() {
        let options = with_policy(DomainPolicy::Default);
        let result = check("foo@bar.com", &options);
        assert_eq!(result.message(), Some("Email domain is not allowed."));
        assert!(check("foo@gmail.com", &options).is_valid());
        assert!(check("Foo@GMAIL.COM", &options).is_valid());
    }

    #[test]
    fn test_custom_domain_list() {
        let options = with_policy(DomainPolicy::Only(vec!["@myOwnDomain.com".to_owned()]));
        assert!(check("joao@myOwnDomain.com", &options).is_valid());
        assert!(check("joao@myowndomain.com", &options).is_valid());
        assert!(!check("joao@gmail.com", &options).is_valid());
    }

    #[test]
    fn test_domain_entries_are_escaped() {
        let options = with_policy(DomainPolicy::Only(vec!["@a.com".to_owned()]));
        // "." must not match any character.
        let result = check("joao@abcom", &options);
        assert_eq!(result.message(), Some("Email domain is not allowed."));
    }

    #[test]
    fn test_empty_domain_list_falls_back_to_default() {
        let options = with_policy(DomainPolicy::Only(Vec::new()));
        assert!(check("foo@yahoo.com", &options).is_valid());
        assert!(!check("foo@bar.com", &options).is_valid());
    }

    #[test]
    fn test_empty_domain_entry_is_violation() {
        let options = with_policy(DomainPolicy::Only(vec![String::new()]));
        let err = validate_email("foo@bar.com", &options).unwrap_err();
        assert!(
            matches!(err, ContractViolation::InvalidDomainList { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn test_invalid_shape() {
        let result = check("not-an-email", &EmailOptions::default());
        assert_eq!(result.message(), Some("This e-mail is not valid"));
    }

    #[test]
    fn test_too_long_is_templated() {
        let options = EmailOptions {
            max_length: Some(10),
            ..EmailOptions::default()
        };
        let result = check("someone@example.com", &options);
        assert_eq!(
            result.message(),
            Some("Email cannot be greater than 10 characters")
        );
    }

    #[test]
    fn test_country_suffix() {
        let options = EmailOptions {
            country: Some("br".to_owned()),
            ..EmailOptions::default()
        };
        assert!(check("joao@empresa.com.br", &options).is_valid());
        let result = check("joao@empresa.com", &options);
        assert_eq!(
            result.message(),
            Some("This email is not valid in the country")
        );
    }

    #[test]
    fn test_blank_country_skips_suffix_check() {
        for country in ["", "  "] {
            let options = EmailOptions {
                country: Some(country.to_owned()),
                ..EmailOptions::default()
            };
            assert!(check("foo@bar.com", &options).is_valid(), "country: {country:?}");
        }
        let options: EmailOptions = serde_json::from_str(r#"{"country": ""}"#).unwrap();
        assert!(check("foo@bar.com", &options).is_valid());
    }

    #[test]
    fn test_deserialize_domain_policy() {
        let options: EmailOptions = serde_json::from_str(r#"{"validDomains": true}"#).unwrap();
        assert_eq!(options.valid_domains, DomainPolicy::Default);

        let options: EmailOptions = serde_json::from_str(r#"{"validDomains": false}"#).unwrap();
        assert_eq!(options.valid_domains, DomainPolicy::Any);

        let options: EmailOptions =
            serde_json::from_str(r#"{"validDomains": ["@corp.io"], "maxLength": 50}"#).unwrap();
        assert_eq!(
            options.valid_domains,
            DomainPolicy::Only(vec!["@corp.io".to_owned()])
        );
        assert_eq!(options.max_length, Some(50));
    }
}
