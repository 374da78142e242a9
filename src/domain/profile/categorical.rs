//! Closed enumerations describing a persona.
//!
//! Each enumeration is generated by [`categorical!`], which provides serde
//! support in `snake_case`, `as_str`, `Display`, the list of accepted values,
//! and a `parse` that reports unknown values as a [`ValidationError`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Generates a closed categorical enumeration.
///
/// # Example
///
/// ```ignore
/// categorical!(
///     /// Housing category.
///     HousingType, "housing_type" {
///         Apartment => "apartment",
///         House => "house",
///     }
/// );
/// ```
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire values accepted by [`Self::parse`].
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Record field this enumeration is read from.
            pub const FIELD: &'static str = $field;

            /// Returns the wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Parses a wire value, rejecting anything outside the enumeration.
            pub fn parse(value: &str) -> Result<Self, ValidationError> {
                match value.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ValidationError::unknown_variant($field, other, Self::VALUES)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

categorical!(
    /// Broad climate classification of the persona's city.
    ClimateZone, "climate_zone" {
        Tropical => "tropical",
        Temperate => "temperate",
        Cold => "cold",
        Arid => "arid",
    }
);

categorical!(
    /// Primary mode of daily transport.
    TransportMode, "primary_transport" {
        Car => "car",
        Motorcycle => "motorcycle",
        Bicycle => "bicycle",
        PublicTransit => "public_transit",
        Walking => "walking",
    }
);

categorical!(
    /// Dietary pattern.
    Diet, "diet" {
        HeavyMeat => "heavy_meat",
        ModerateMeat => "moderate_meat",
        Vegetarian => "vegetarian",
        Vegan => "vegan",
    }
);

categorical!(
    HousingType, "housing_type" {
        Apartment => "apartment",
        House => "house",
    }
);

categorical!(
    /// Main source of household electricity.
    EnergySource, "energy_source" {
        Grid => "grid",
        Solar => "solar",
        Generator => "generator",
    }
);

categorical!(
    IncomeLevel, "income_level" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);
