//! Scoring Oracle Port - Interface for the external pair judgment service.
//!
//! Given two actions and a persona, an oracle returns a binary preference
//! label. Calls may suspend on network I/O and may fail; the scorer treats
//! every failure as an item-level [`OracleError`].

use async_trait::async_trait;

use crate::domain::action::Action;
use crate::domain::combination::PreferenceLabel;
use crate::domain::profile::UserProfile;

use super::AIError;

/// One judgment request.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRequest<'a> {
    pub action_a: &'a Action,
    pub action_b: &'a Action,
    pub user_profile: &'a UserProfile,
    /// Trace id for log correlation.
    pub trace_id: &'a str,
}

/// Port for the pair judgment service.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Judges whether `action_a` is preferred over `action_b` for the persona.
    async fn score(&self, request: ScoringRequest<'_>) -> Result<PreferenceLabel, OracleError>;
}

/// Item-level oracle failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// The request could not be delivered or the provider rejected it.
    #[error("oracle transport failure: {0}")]
    Transport(#[from] AIError),

    /// The oracle answered with something other than a 0/1 label.
    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    /// No answer within the per-call deadline.
    #[error("oracle call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl OracleError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn timeout(timeout: std::time::Duration) -> Self {
        Self::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}
