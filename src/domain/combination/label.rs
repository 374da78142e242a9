//! Binary preference label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// The oracle's judgment for an ordered pair.
///
/// Serialized as `1` when action_a is preferred and `0` otherwise.
/// Ties are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PreferenceLabel {
    /// action_a is preferred over action_b.
    FirstPreferred,
    /// action_b is preferred over action_a.
    SecondPreferred,
}

impl PreferenceLabel {
    /// Returns the wire value (1 or 0).
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::FirstPreferred => 1,
            Self::SecondPreferred => 0,
        }
    }

    /// Parses a wire value.
    pub fn from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Self::FirstPreferred),
            0 => Ok(Self::SecondPreferred),
            other => Err(ValidationError::invalid_format(
                "score",
                format!("expected 0 or 1, got {}", other),
            )),
        }
    }

    /// The label of the order-swapped pair.
    pub fn flipped(&self) -> Self {
        match self {
            Self::FirstPreferred => Self::SecondPreferred,
            Self::SecondPreferred => Self::FirstPreferred,
        }
    }
}

impl From<PreferenceLabel> for u8 {
    fn from(label: PreferenceLabel) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for PreferenceLabel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl fmt::Display for PreferenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
