//! Dataset Store Port - Interface for the flat data documents.
//!
//! Documents are read and written whole. A failed write must leave the
//! previous document (or nothing) in place, never a partial file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::action::Action;
use crate::domain::combination::{Combination, CombinationRecord, ScoredCombination};
use crate::domain::profile::UserProfile;

/// Errors that can occur during dataset storage operations.
///
/// All of them are fatal to a batch run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Deserialization { path: PathBuf, message: String },

    #[error("Failed to serialize {}: {message}", path.display())]
    Serialization { path: PathBuf, message: String },

    #[error("Invalid record {index} in {}: {message}", path.display())]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        message: String,
    },
}

impl DatasetError {
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Port for loading and saving pipeline documents.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Load the action catalogue.
    async fn load_actions(&self, path: &Path) -> Result<Vec<Action>, DatasetError>;

    /// Load the persona list.
    async fn load_profiles(&self, path: &Path) -> Result<Vec<UserProfile>, DatasetError>;

    /// Save the persona list.
    async fn save_profiles(&self, path: &Path, profiles: &[UserProfile]) -> Result<(), DatasetError>;

    /// Load the unscored work set without validating its entries.
    async fn load_work_set(&self, path: &Path) -> Result<Vec<CombinationRecord>, DatasetError>;

    /// Save the unscored work set.
    async fn save_work_set(&self, path: &Path, work_set: &[Combination]) -> Result<(), DatasetError>;

    /// Load a scored set.
    async fn load_scored(&self, path: &Path) -> Result<Vec<ScoredCombination>, DatasetError>;

    /// Save a scored set.
    async fn save_scored(&self, path: &Path, scored: &[ScoredCombination]) -> Result<(), DatasetError>;
}
