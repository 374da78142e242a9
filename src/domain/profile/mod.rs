//! Synthetic personas ("user profiles").
//!
//! A [`UserProfile`] is a closed set of categorical fields plus a freeform
//! city. Construction from raw records goes through [`UserProfile::from_value`],
//! which rejects values outside the enumerations before anything is
//! dispatched to the scoring oracle.

mod categorical;

pub use categorical::{ClimateZone, Diet, EnergySource, HousingType, IncomeLevel, TransportMode};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

/// A synthetic individual against which two actions are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub city: String,
    pub climate_zone: ClimateZone,
    pub primary_transport: TransportMode,
    pub diet: Diet,
    pub housing_type: HousingType,
    pub energy_source: EnergySource,
    pub income_level: IncomeLevel,
}

impl UserProfile {
    /// Creates a profile, rejecting an empty city.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        city: impl Into<String>,
        climate_zone: ClimateZone,
        primary_transport: TransportMode,
        diet: Diet,
        housing_type: HousingType,
        energy_source: EnergySource,
        income_level: IncomeLevel,
    ) -> Result<Self, ValidationError> {
        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(ValidationError::empty_field("city"));
        }

        Ok(Self {
            city,
            climate_zone,
            primary_transport,
            diet,
            housing_type,
            energy_source,
            income_level,
        })
    }

    /// Builds a profile from an untyped JSON record.
    ///
    /// Fields are checked in declaration order and the first failure is
    /// returned.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        let object = raw
            .as_object()
            .ok_or_else(|| ValidationError::invalid_format("user_profile", "expected an object"))?;

        Self::new(
            text_field(object, "city")?,
            ClimateZone::parse(text_field(object, ClimateZone::FIELD)?)?,
            TransportMode::parse(text_field(object, TransportMode::FIELD)?)?,
            Diet::parse(text_field(object, Diet::FIELD)?)?,
            HousingType::parse(text_field(object, HousingType::FIELD)?)?,
            EnergySource::parse(text_field(object, EnergySource::FIELD)?)?,
            IncomeLevel::parse(text_field(object, IncomeLevel::FIELD)?)?,
        )
    }

    /// One-line description used in log events.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {}, {}, {}, {}, {} income)",
            self.city,
            self.climate_zone,
            self.primary_transport,
            self.diet,
            self.housing_type,
            self.energy_source,
            self.income_level
        )
    }
}

fn text_field<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing_field(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::invalid_format(field, "expected text")),
    }
}
