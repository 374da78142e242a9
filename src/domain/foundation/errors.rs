//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur while constructing entities from raw records.
///
/// A record that fails validation is never dispatched to the scoring oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' has unknown value '{value}', expected one of: {expected}")]
    UnknownVariant {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Combination pairs action '{solution}' with itself")]
    IdenticalActions { solution: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a missing field validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown enumeration value error.
    pub fn unknown_variant(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &[&str],
    ) -> Self {
        ValidationError::UnknownVariant {
            field: field.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Prefixes the field name with the record section it came from
    /// (e.g. `cost` becomes `action_a.cost`).
    pub fn within(self, section: &str) -> Self {
        let nest = |field: String| format!("{}.{}", section, field);
        match self {
            ValidationError::EmptyField { field } => ValidationError::EmptyField { field: nest(field) },
            ValidationError::MissingField { field } => {
                ValidationError::MissingField { field: nest(field) }
            }
            ValidationError::InvalidFormat { field, reason } => ValidationError::InvalidFormat {
                field: nest(field),
                reason,
            },
            ValidationError::UnknownVariant {
                field,
                value,
                expected,
            } => ValidationError::UnknownVariant {
                field: nest(field),
                value,
                expected,
            },
            other => other,
        }
    }
}
