//! Single-purpose format predicates.
//!
//! These answer one yes/no question about a string and carry no messages.
//! Most are a short scan over the characters. Dates and times go through
//! `chrono`'s parser so calendar rules (month lengths, leap years) hold.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::error::ContractViolation;
use crate::rules::is_blank;

/// Characters allowed in the local part of an email address (besides ASCII
/// alphanumerics).
pub const EMAIL_LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Maximum length of the local part of an email address.
const EMAIL_LOCAL_MAX: usize = 64;

/// Maximum length of a domain name.
const DOMAIN_MAX: usize = 253;

/// Maximum length of one domain label.
const DOMAIN_LABEL_MAX: usize = 63;

/// General email shape: `local@domain.tld`.
///
/// The local part is at most 64 characters of ASCII alphanumerics and
/// [`EMAIL_LOCAL_SPECIALS`], without leading, trailing or doubled dots. The
/// domain has at least two labels of ASCII alphanumerics and inner hyphens,
/// and ends in an alphabetic top-level label of two or more letters.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    is_email_local(local) && is_domain(domain)
}

fn is_email_local(local: &str) -> bool {
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c))
}

fn is_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > DOMAIN_MAX {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_domain_label(label)) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= DOMAIN_LABEL_MAX
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A TCP/UDP port number, `0` through `65535`, without sign or leading zeros.
#[must_use]
pub fn is_port(value: &str) -> bool {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if value.len() > 1 && value.starts_with('0') {
        return false;
    }
    value.parse::<u16>().is_ok()
}

/// Whether every character is ASCII.
///
/// # Errors
///
/// Returns [`ContractViolation::EmptyInput`] for an empty or blank string,
/// for which the question has no meaningful answer.
pub fn is_ascii(value: &str) -> Result<bool, ContractViolation> {
    if value.trim().is_empty() {
        return Err(ContractViolation::EmptyInput {
            predicate: "is_ascii",
        });
    }
    Ok(value.is_ascii())
}

/// A 32-character hexadecimal MD5 digest.
#[must_use]
pub fn is_md5(value: &str) -> bool {
    value.len() == 32 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Standard (RFC 4648) padded base64.
#[must_use]
pub fn is_base64(value: &str) -> bool {
    if value.is_empty() || !value.len().is_multiple_of(4) {
        return false;
    }
    let body = value.trim_end_matches('=');
    let padding = value.len() - body.len();
    padding <= 2
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
}

/// A MAC address: six pairs of hex digits separated consistently by `:` or `-`.
#[must_use]
pub fn is_mac_address(value: &str) -> bool {
    let separator = if value.contains(':') { ':' } else { '-' };
    let groups: Vec<&str> = value.split(separator).collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|group| group.len() == 2 && group.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Card number lengths accepted after separators are removed.
const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Date layouts accepted by [`is_date`].
pub const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Time layouts accepted by [`is_time`].
pub const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Payment card networks recognised by [`identify_card_brand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    DinersClub,
    Jcb,
}

impl CardBrand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::DinersClub => "diners",
            Self::Jcb => "jcb",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digits of a card number with spaces and hyphens removed, if it has a
/// plausible length and nothing else.
fn card_digits(value: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = value
        .bytes()
        .filter(|&b| !matches!(b, b' ' | b'-'))
        .collect();
    (CARD_DIGITS.contains(&digits.len()) && digits.iter().all(u8::is_ascii_digit))
        .then_some(digits)
}

fn luhn_checksum_ok(digits: &[u8]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, digit)| {
            let digit = u32::from(digit - b'0');
            if position.is_multiple_of(2) {
                digit
            } else if digit >= 5 {
                digit * 2 - 9
            } else {
                digit * 2
            }
        })
        .sum();
    sum.is_multiple_of(10)
}

/// Value of the first `count` digits.
fn leading(digits: &[u8], count: usize) -> u32 {
    digits
        .iter()
        .take(count)
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

/// A payment card number: 13 to 19 digits (spaces and hyphens ignored) that
/// pass the Luhn checksum.
#[must_use]
pub fn is_credit_card_valid(value: &str) -> bool {
    card_digits(value).is_some_and(|digits| luhn_checksum_ok(&digits))
}

/// The card network a number belongs to, from its issuer prefix.
///
/// Only the prefix and length are looked at; pair with
/// [`is_credit_card_valid`] to also check the digits.
#[must_use]
pub fn identify_card_brand(value: &str) -> Option<CardBrand> {
    let digits = card_digits(value)?;
    let (two, three, four) = (
        leading(&digits, 2),
        leading(&digits, 3),
        leading(&digits, 4),
    );
    let brand = if digits[0] == b'4' {
        CardBrand::Visa
    } else if matches!(two, 51..=55) || matches!(four, 2221..=2720) {
        CardBrand::Mastercard
    } else if matches!(two, 34 | 37) {
        CardBrand::Amex
    } else if four == 6011 || two == 65 || matches!(three, 644..=649) {
        CardBrand::Discover
    } else if matches!(three, 300..=305) || matches!(two, 36 | 38) {
        CardBrand::DinersClub
    } else if matches!(four, 3528..=3589) {
        CardBrand::Jcb
    } else {
        return None;
    };
    Some(brand)
}

/// Every email address found in free text, in order of appearance.
///
/// Text is split on whitespace and common delimiters (`,;:<>()[]"`), and
/// sentence punctuation around a token is dropped before [`is_email`] decides.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<&str> {
    text.split(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | ':' | '<' | '>' | '(' | ')' | '[' | ']' | '"')
    })
    .map(|token| token.trim_matches(|c: char| matches!(c, '.' | '!' | '?' | '\'')))
    .filter(|token| is_email(token))
    .collect()
}

/// A calendar date in one of [`DATE_FORMATS`] that actually exists.
#[must_use]
pub fn is_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// A wall-clock time, `HH:MM` or `HH:MM:SS`, 24-hour.
#[must_use]
pub fn is_time(value: &str) -> bool {
    TIME_FORMATS
        .iter()
        .any(|format| NaiveTime::parse_from_str(value, format).is_ok())
}

/// Plain decimal notation: optional sign, digits, optional `.` or `,`
/// fraction. No exponent or grouping.
#[must_use]
pub fn is_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once(['.', ',']) {
        Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
        Some(_) => return false,
        None => (unsigned, ""),
    };
    !(integer.is_empty() && fraction.is_empty())
        && integer.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

/// Anything that parses as a finite number, exponents included. Surrounding
/// whitespace is ignored.
#[must_use]
pub fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Empty or whitespace only.
#[must_use]
pub fn is_empty(value: &str) -> bool {
    is_blank(value)
}
