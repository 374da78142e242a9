//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI base URL (must start with http:// or https://)")]
    InvalidBaseUrl,

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Concurrency must be between 1 and {max}, got {value}")]
    InvalidConcurrency { value: usize, max: usize },

    #[error("pairs_per_profile must be at least 1")]
    InvalidPairsPerProfile,

    #[error("profile_count must be at least 1")]
    InvalidProfileCount,

    #[error("Data file name for {0} must not be empty")]
    EmptyFileName(&'static str),

    #[error("Data files {0} and {1} must differ")]
    DuplicateFileName(&'static str, &'static str),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
