//! Pair comparison records.
//!
//! - [`CombinationRecord`] - an unvalidated work-set entry as read from disk
//! - [`Combination`] - two distinct actions bound to one persona
//! - [`ScoredCombination`] - a combination plus its [`PreferenceLabel`]

mod label;

pub use label::PreferenceLabel;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::action::{Action, ActionKey};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::UserProfile;

/// A work-set entry before validation.
///
/// Every section is kept untyped so one malformed entry cannot make the
/// whole document unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRecord {
    #[serde(default)]
    pub action_a: Value,
    #[serde(default)]
    pub action_b: Value,
    #[serde(default)]
    pub user_profile: Value,
}

impl CombinationRecord {
    /// Best-effort label for log events, readable even when validation fails.
    pub fn describe(&self) -> String {
        let solution = |v: &Value| {
            v.get("solution")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string()
        };
        let city = self
            .user_profile
            .get("city")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>");
        format!(
            "{} vs {} ({})",
            solution(&self.action_a),
            solution(&self.action_b),
            city
        )
    }
}

/// An unordered action pair bound to one persona.
///
/// Invariant: the two actions have different identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CombinationParts")]
pub struct Combination {
    action_a: Action,
    action_b: Action,
    user_profile: UserProfile,
}

#[derive(Deserialize)]
struct CombinationParts {
    action_a: Action,
    action_b: Action,
    user_profile: UserProfile,
}

impl TryFrom<CombinationParts> for Combination {
    type Error = ValidationError;

    fn try_from(parts: CombinationParts) -> Result<Self, Self::Error> {
        Combination::new(parts.action_a, parts.action_b, parts.user_profile)
    }
}

impl Combination {
    /// Binds two distinct actions to a persona.
    pub fn new(
        action_a: Action,
        action_b: Action,
        user_profile: UserProfile,
    ) -> Result<Self, ValidationError> {
        if action_a.same_identity(&action_b) {
            return Err(ValidationError::IdenticalActions {
                solution: action_a.solution.clone(),
            });
        }

        Ok(Self {
            action_a,
            action_b,
            user_profile,
        })
    }

    /// Validates a raw work-set entry into a combination.
    pub fn from_record(record: &CombinationRecord) -> Result<Self, ValidationError> {
        let action_a = Action::from_value(&record.action_a).map_err(|e| e.within("action_a"))?;
        let action_b = Action::from_value(&record.action_b).map_err(|e| e.within("action_b"))?;
        let user_profile =
            UserProfile::from_value(&record.user_profile).map_err(|e| e.within("user_profile"))?;

        Self::new(action_a, action_b, user_profile)
    }

    pub fn action_a(&self) -> &Action {
        &self.action_a
    }

    pub fn action_b(&self) -> &Action {
        &self.action_b
    }

    pub fn user_profile(&self) -> &UserProfile {
        &self.user_profile
    }

    /// Returns the same pair in the opposite order.
    pub fn swapped(&self) -> Self {
        Self {
            action_a: self.action_b.clone(),
            action_b: self.action_a.clone(),
            user_profile: self.user_profile.clone(),
        }
    }

    /// Ordered identity of this combination.
    pub fn key(&self) -> CombinationKey {
        CombinationKey {
            action_a: self.action_a.key(),
            action_b: self.action_b.key(),
            user_profile: self.user_profile.clone(),
        }
    }

    /// Label for log events.
    pub fn describe(&self) -> String {
        format!(
            "{} vs {} ({})",
            self.action_a.solution, self.action_b.solution, self.user_profile.city
        )
    }

    /// Converts the combination back into an untyped work-set entry.
    pub fn to_record(&self) -> Result<CombinationRecord, serde_json::Error> {
        Ok(CombinationRecord {
            action_a: serde_json::to_value(&self.action_a)?,
            action_b: serde_json::to_value(&self.action_b)?,
            user_profile: serde_json::to_value(&self.user_profile)?,
        })
    }
}

/// Ordered (action_a, action_b, persona) identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombinationKey {
    pub action_a: ActionKey,
    pub action_b: ActionKey,
    pub user_profile: UserProfile,
}

impl CombinationKey {
    /// Key of the order-swapped combination.
    pub fn mirrored(&self) -> Self {
        Self {
            action_a: self.action_b.clone(),
            action_b: self.action_a.clone(),
            user_profile: self.user_profile.clone(),
        }
    }
}

/// A combination with the oracle's judgment attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCombination {
    #[serde(flatten)]
    pub combination: Combination,
    pub score: PreferenceLabel,
}

impl ScoredCombination {
    pub fn new(combination: Combination, score: PreferenceLabel) -> Self {
        Self { combination, score }
    }

    /// The order-swapped, label-flipped counterpart.
    pub fn mirrored(&self) -> Self {
        Self {
            combination: self.combination.swapped(),
            score: self.score.flipped(),
        }
    }

    pub fn key(&self) -> CombinationKey {
        self.combination.key()
    }
}
