//! Batch pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound on concurrent oracle calls.
pub const MAX_CONCURRENCY: usize = 100;

/// Pipeline tuning knobs
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum concurrent oracle calls (K)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Pairs sampled per persona
    #[serde(default = "default_pairs_per_profile")]
    pub pairs_per_profile: usize,

    /// Sampling seed; entropy-seeded when absent
    pub seed: Option<u64>,

    /// Personas requested by the `profiles` command
    #[serde(default = "default_profile_count")]
    pub profile_count: usize,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ValidationError::InvalidConcurrency {
                value: self.concurrency,
                max: MAX_CONCURRENCY,
            });
        }
        if self.pairs_per_profile == 0 {
            return Err(ValidationError::InvalidPairsPerProfile);
        }
        if self.profile_count == 0 {
            return Err(ValidationError::InvalidProfileCount);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            pairs_per_profile: default_pairs_per_profile(),
            seed: None,
            profile_count: default_profile_count(),
        }
    }
}

fn default_concurrency() -> usize {
    10
}

fn default_pairs_per_profile() -> usize {
    150
}

fn default_profile_count() -> usize {
    25
}
