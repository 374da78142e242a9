//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PRIORITIZER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use action_prioritizer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Scoring with {} workers", config.pipeline.concurrency);
//! ```

mod ai;
mod data;
mod error;
mod logging;
mod pipeline;

pub use ai::AiConfig;
pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use pipeline::{PipelineConfig, MAX_CONCURRENCY};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration for the offline stages. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language model access (OpenAI-compatible)
    #[serde(default)]
    pub ai: AiConfig,

    /// Concurrency, sampling and persona counts
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Document locations
    #[serde(default)]
    pub data: DataConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRIORITIZER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PRIORITIZER__PIPELINE__CONCURRENCY=20` -> `pipeline.concurrency = 20`
    /// - `PRIORITIZER__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRIORITIZER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.pipeline.validate()?;
        self.data.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
