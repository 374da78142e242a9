//! In-Memory Dataset Store Adapter
//!
//! Keeps documents in memory keyed by path.
//! Useful for testing handlers without touching the filesystem.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::action::Action;
use crate::domain::combination::{Combination, CombinationRecord, ScoredCombination};
use crate::domain::profile::UserProfile;
use crate::ports::{DatasetError, DatasetStore};

#[derive(Debug, Clone)]
enum Document {
    Actions(Vec<Action>),
    Profiles(Vec<UserProfile>),
    WorkSet(Vec<CombinationRecord>),
    Scored(Vec<ScoredCombination>),
}

/// In-memory storage for pipeline documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetStore {
    documents: Arc<RwLock<HashMap<PathBuf, Document>>>,
}

impl InMemoryDatasetStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an action catalogue.
    pub async fn insert_actions(&self, path: impl Into<PathBuf>, actions: Vec<Action>) {
        self.documents
            .write()
            .await
            .insert(path.into(), Document::Actions(actions));
    }

    /// Seed a work set with raw, possibly invalid, entries.
    pub async fn insert_work_set(&self, path: impl Into<PathBuf>, records: Vec<CombinationRecord>) {
        self.documents
            .write()
            .await
            .insert(path.into(), Document::WorkSet(records));
    }

    /// Whether a document exists at `path`.
    pub async fn contains(&self, path: &Path) -> bool {
        self.documents.read().await.contains_key(path)
    }

    async fn get(&self, path: &Path) -> Result<Document, DatasetError> {
        self.documents
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| DatasetError::NotFound(path.to_path_buf()))
    }

    async fn put(&self, path: &Path, document: Document) {
        self.documents
            .write()
            .await
            .insert(path.to_path_buf(), document);
    }
}

fn wrong_kind(path: &Path, expected: &str) -> DatasetError {
    DatasetError::Deserialization {
        path: path.to_path_buf(),
        message: format!("document is not {}", expected),
    }
}

#[async_trait]
impl DatasetStore for InMemoryDatasetStore {
    async fn load_actions(&self, path: &Path) -> Result<Vec<Action>, DatasetError> {
        match self.get(path).await? {
            Document::Actions(actions) => Ok(actions),
            _ => Err(wrong_kind(path, "an action catalogue")),
        }
    }

    async fn load_profiles(&self, path: &Path) -> Result<Vec<UserProfile>, DatasetError> {
        match self.get(path).await? {
            Document::Profiles(profiles) => Ok(profiles),
            _ => Err(wrong_kind(path, "a profile list")),
        }
    }

    async fn save_profiles(&self, path: &Path, profiles: &[UserProfile]) -> Result<(), DatasetError> {
        self.put(path, Document::Profiles(profiles.to_vec())).await;
        Ok(())
    }

    async fn load_work_set(&self, path: &Path) -> Result<Vec<CombinationRecord>, DatasetError> {
        match self.get(path).await? {
            Document::WorkSet(records) => Ok(records),
            _ => Err(wrong_kind(path, "a work set")),
        }
    }

    async fn save_work_set(&self, path: &Path, work_set: &[Combination]) -> Result<(), DatasetError> {
        let records = work_set
            .iter()
            .map(Combination::to_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatasetError::Serialization {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        self.put(path, Document::WorkSet(records)).await;
        Ok(())
    }

    async fn load_scored(&self, path: &Path) -> Result<Vec<ScoredCombination>, DatasetError> {
        match self.get(path).await? {
            Document::Scored(scored) => Ok(scored),
            _ => Err(wrong_kind(path, "a scored set")),
        }
    }

    async fn save_scored(&self, path: &Path, scored: &[ScoredCombination]) -> Result<(), DatasetError> {
        self.put(path, Document::Scored(scored.to_vec())).await;
        Ok(())
    }
}
