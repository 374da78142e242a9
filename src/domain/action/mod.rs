//! Candidate climate actions.
//!
//! An [`Action`] is immutable once loaded. Its identity is the
//! (action name, solution name) pair, exposed as [`ActionKey`].

mod coercion;

pub use coercion::{parse_cost, parse_cost_text};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::ValidationError;

use coercion::{deserialize_cost, deserialize_text};

/// A candidate concrete measure with descriptive and quantitative attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,
    pub solution: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub solution_classification: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub cluster: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub adoption_unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub effectiveness: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub adoption_current: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub adoption_achievable_range: Option<String>,
    /// Gt CO2-eq (100-yr) per year.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub ghg_impact: Option<String>,
    /// US$ per t CO2-eq. Accepts text with thousands separators on input.
    #[serde(default, deserialize_with = "deserialize_cost")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub climate_pollutants_mitigated: Option<String>,
    /// "Emergency Brake", "Gradual" or "Delayed".
    #[serde(default, deserialize_with = "deserialize_text")]
    pub speed_of_action: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub climate_adaptation_benefits: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub environment_benefits: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub human_wellbeing_benefits: Option<String>,
}

/// Identity of an action within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey {
    pub action: String,
    pub solution: String,
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.solution, self.action)
    }
}

impl Action {
    /// Creates an action with only its identifying fields set.
    pub fn new(
        action: impl Into<String>,
        solution: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let action = action.into().trim().to_string();
        let solution = solution.into().trim().to_string();
        if action.is_empty() {
            return Err(ValidationError::empty_field("action"));
        }
        if solution.is_empty() {
            return Err(ValidationError::empty_field("solution"));
        }

        Ok(Self {
            action,
            solution,
            solution_classification: None,
            mode: None,
            sector: None,
            cluster: None,
            adoption_unit: None,
            effectiveness: None,
            adoption_current: None,
            adoption_achievable_range: None,
            ghg_impact: None,
            cost: None,
            climate_pollutants_mitigated: None,
            speed_of_action: None,
            climate_adaptation_benefits: None,
            environment_benefits: None,
            human_wellbeing_benefits: None,
        })
    }

    /// Builds an action from an untyped JSON record.
    ///
    /// Checks the identifying fields and the cost coercion explicitly so the
    /// error names the offending field, then deserializes the remainder.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        let object = raw
            .as_object()
            .ok_or_else(|| ValidationError::invalid_format("action", "expected an object"))?;

        for field in ["action", "solution"] {
            match object.get(field) {
                None | Some(Value::Null) => return Err(ValidationError::missing_field(field)),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(ValidationError::empty_field(field))
                }
                Some(Value::String(_)) => {}
                Some(_) => return Err(ValidationError::invalid_format(field, "expected text")),
            }
        }

        if let Some(cost) = object.get("cost") {
            parse_cost(cost)?;
        }

        let action: Action = serde_json::from_value(raw.clone())
            .map_err(|e| ValidationError::invalid_format("action", e.to_string()))?;

        Ok(Action {
            action: action.action.trim().to_string(),
            solution: action.solution.trim().to_string(),
            ..action
        })
    }

    /// Returns the identity of this action.
    pub fn key(&self) -> ActionKey {
        ActionKey {
            action: self.action.clone(),
            solution: self.solution.clone(),
        }
    }

    /// Returns true if both actions share the same identity.
    pub fn same_identity(&self, other: &Action) -> bool {
        self.action == other.action && self.solution == other.solution
    }

    /// Returns true if the action carries GHG impact data.
    pub fn has_ghg_impact(&self) -> bool {
        self.ghg_impact.is_some()
    }

    /// Sets the sector.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the GHG impact.
    pub fn with_ghg_impact(mut self, ghg_impact: impl Into<String>) -> Self {
        self.ghg_impact = Some(ghg_impact.into());
        self
    }

    /// Sets the cost per tonne.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Sets the speed-of-action category.
    pub fn with_speed_of_action(mut self, speed: impl Into<String>) -> Self {
        self.speed_of_action = Some(speed.into());
        self
    }
}
