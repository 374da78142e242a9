//! Lenient field coercion for action records.
//!
//! Action sheets are hand-maintained, so numeric columns arrive as text
//! with thousands separators and text columns sometimes arrive as numbers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::foundation::ValidationError;

/// Coerces a raw cost value into a float.
///
/// `null`, empty and whitespace-only text are absent. Numbers pass through.
/// Text has `,` separators removed before parsing.
pub fn parse_cost(raw: &Value) -> Result<Option<f64>, ValidationError> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValidationError::invalid_format("cost", format!("{} is not a float", n))),
        Value::String(s) => parse_cost_text(s),
        other => Err(ValidationError::invalid_format(
            "cost",
            format!("expected number or text, got {}", other),
        )),
    }
}

/// Parses a textual cost such as `"1,250.5"`.
pub fn parse_cost_text(text: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ValidationError::invalid_format(
            "cost",
            format!("'{}' is not a number", trimmed),
        )),
    }
}

pub(super) fn deserialize_cost<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    parse_cost(&raw).map_err(D::Error::custom)
}

pub(super) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected text, got {}", other))),
    }
}
