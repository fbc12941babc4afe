//! The verdict returned by every string validator.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of validating a single value.
///
/// A failed validation always carries a message; a successful one never does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// Every rule passed.
    Valid,
    /// A rule failed.
    Invalid {
        /// Human-readable reason, resolved from the failing slot.
        message: String,
    },
}

impl ValidationResult {
    /// Build a failed result.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Whether the value passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, `None` for a valid result.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message),
        }
    }
}

/// Serialized as `{"valid": true}` or `{"valid": false, "message": "..."}`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid => {
                let mut state = serializer.serialize_struct("ValidationResult", 1)?;
                state.serialize_field("valid", &true)?;
                state.end()
            }
            Self::Invalid { message } => {
                let mut state = serializer.serialize_struct("ValidationResult", 2)?;
                state.serialize_field("valid", &false)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}
