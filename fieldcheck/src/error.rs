//! Caller contract violations.
//!
//! These are bugs in the calling code, not problems with user input, and are
//! always reported before the value itself is inspected.

use thiserror::Error;

/// A validator was called with options it cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContractViolation {
    /// A length bound was set to zero.
    #[error("{option} must be a positive number")]
    ZeroBound {
        /// Option name as callers spell it (`minLength`, `maxLength`).
        option: &'static str,
    },

    /// The lower bound exceeds the upper bound.
    #[error("minLength ({min}) cannot be greater than maxLength ({max})")]
    InvertedBounds {
        /// Effective minimum.
        min: usize,
        /// Effective maximum.
        max: usize,
    },

    /// The positional override list has more entries than the validator has slots.
    #[error("override message list has {given} entries but the validator only has {slots} slots")]
    TooManyMessages {
        /// Length of the supplied list.
        given: usize,
        /// Number of slots of the validator.
        slots: usize,
    },

    /// A phone format template is unusable.
    #[error("invalid phone format '{format}': {cause}")]
    InvalidPhoneFormat {
        /// The template as supplied.
        format: String,
        /// What is wrong with it.
        cause: String,
    },

    /// A custom email domain allow-list is unusable.
    #[error("invalid allowed email domains: {cause}")]
    InvalidDomainList {
        /// What is wrong with the list.
        cause: String,
    },

    /// A predicate that requires content was given a blank string.
    #[error("{predicate}: input value must not be an empty string")]
    EmptyInput {
        /// Name of the predicate.
        predicate: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ContractViolation::InvertedBounds { min: 25, max: 3 };
        assert_eq!(
            err.to_string(),
            "minLength (25) cannot be greater than maxLength (3)"
        );

        let err = ContractViolation::ZeroBound {
            option: "maxLength",
        };
        assert_eq!(err.to_string(), "maxLength must be a positive number");
    }
}
