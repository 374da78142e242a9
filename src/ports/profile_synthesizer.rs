//! Profile Synthesizer Port - Interface for generating synthetic personas.

use async_trait::async_trait;

use crate::domain::profile::UserProfile;

use super::AIError;

/// Errors from persona synthesis.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("profile synthesis failed: {0}")]
    Provider(#[from] AIError),

    #[error("malformed profile response: {0}")]
    MalformedResponse(String),

    #[error("no valid profiles returned")]
    Empty,
}

/// Port for persona generation.
#[async_trait]
pub trait ProfileSynthesizer: Send + Sync {
    /// Generate up to `count` validated, globally diverse personas.
    async fn synthesize(&self, count: usize) -> Result<Vec<UserProfile>, SynthesisError>;
}
