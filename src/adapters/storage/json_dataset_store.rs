//! Filesystem storage adapter for the flat JSON documents.
//!
//! Every document is a pretty-printed JSON array, except the profiles
//! document which is written as `{"profiles": [...]}` and read in either
//! shape.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::action::Action;
use crate::domain::combination::{Combination, CombinationRecord, ScoredCombination};
use crate::domain::profile::UserProfile;
use crate::ports::{DatasetError, DatasetStore};

/// JSON file store. Paths are used as given.
#[derive(Debug, Clone, Default)]
pub struct JsonDatasetStore;

#[derive(Serialize)]
struct ProfilesDocument<'a> {
    profiles: &'a [UserProfile],
}

impl JsonDatasetStore {
    pub fn new() -> Self {
        Self
    }

    async fn read_document(path: &Path) -> Result<Value, DatasetError> {
        let bytes = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DatasetError::NotFound(path.to_path_buf())
            } else {
                DatasetError::io(path, e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| DatasetError::Deserialization {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn expect_array(path: &Path, document: Value) -> Result<Vec<Value>, DatasetError> {
        match document {
            Value::Array(entries) => Ok(entries),
            other => Err(DatasetError::Deserialization {
                path: path.to_path_buf(),
                message: format!("expected a JSON array, found {}", kind(&other)),
            }),
        }
    }

    /// Converts every entry, failing on the first invalid one.
    fn convert_all<T>(
        path: &Path,
        entries: Vec<Value>,
        convert: impl Fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<T>, DatasetError> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                convert(entry).map_err(|message| DatasetError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    message,
                })
            })
            .collect()
    }

    fn deserialize_entry<T: DeserializeOwned>(entry: &Value) -> Result<T, String> {
        T::deserialize(entry).map_err(|e| e.to_string())
    }

    /// Writes to a temporary sibling and renames it into place.
    async fn write_document<T: Serialize + ?Sized>(
        path: &Path,
        document: &T,
    ) -> Result<(), DatasetError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| {
            DatasetError::Serialization {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DatasetError::io(parent, format!("Failed to create directory: {}", e)))?;
        }

        let temp_path = temp_sibling(path);
        fs::write(&temp_path, &bytes).await.map_err(|e| {
            DatasetError::io(&temp_path, format!("Failed to write temporary file: {}", e))
        })?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DatasetError::io(path, format!("Failed to rename file: {}", e)));
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Document written");
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl DatasetStore for JsonDatasetStore {
    async fn load_actions(&self, path: &Path) -> Result<Vec<Action>, DatasetError> {
        let entries = Self::expect_array(path, Self::read_document(path).await?)?;
        let actions = Self::convert_all(path, entries, |entry| {
            Action::from_value(entry).map_err(|e| e.to_string())
        })?;

        tracing::info!(path = %path.display(), count = actions.len(), "Actions loaded");
        Ok(actions)
    }

    async fn load_profiles(&self, path: &Path) -> Result<Vec<UserProfile>, DatasetError> {
        let entries = match Self::read_document(path).await? {
            Value::Object(mut object) => match object.remove("profiles") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(DatasetError::Deserialization {
                        path: path.to_path_buf(),
                        message: "missing \"profiles\" array".to_string(),
                    })
                }
            },
            other => Self::expect_array(path, other)?,
        };

        let profiles = Self::convert_all(path, entries, |entry| {
            UserProfile::from_value(entry).map_err(|e| e.to_string())
        })?;

        tracing::info!(path = %path.display(), count = profiles.len(), "Profiles loaded");
        Ok(profiles)
    }

    async fn save_profiles(&self, path: &Path, profiles: &[UserProfile]) -> Result<(), DatasetError> {
        Self::write_document(path, &ProfilesDocument { profiles }).await
    }

    async fn load_work_set(&self, path: &Path) -> Result<Vec<CombinationRecord>, DatasetError> {
        let entries = Self::expect_array(path, Self::read_document(path).await?)?;
        let records = Self::convert_all(path, entries, Self::deserialize_entry)?;

        tracing::info!(path = %path.display(), count = records.len(), "Work set loaded");
        Ok(records)
    }

    async fn save_work_set(&self, path: &Path, work_set: &[Combination]) -> Result<(), DatasetError> {
        Self::write_document(path, work_set).await
    }

    async fn load_scored(&self, path: &Path) -> Result<Vec<ScoredCombination>, DatasetError> {
        let entries = Self::expect_array(path, Self::read_document(path).await?)?;
        let scored = Self::convert_all(path, entries, Self::deserialize_entry)?;

        tracing::info!(path = %path.display(), count = scored.len(), "Scored set loaded");
        Ok(scored)
    }

    async fn save_scored(&self, path: &Path, scored: &[ScoredCombination]) -> Result<(), DatasetError> {
        Self::write_document(path, scored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::combination::PreferenceLabel;
    use crate::domain::profile::{
        ClimateZone, Diet, EnergySource, HousingType, IncomeLevel, TransportMode,
    };
    use tempfile::TempDir;

    fn profile(city: &str) -> UserProfile {
        UserProfile::new(
            city,
            ClimateZone::Temperate,
            TransportMode::Bicycle,
            Diet::Vegetarian,
            HousingType::House,
            EnergySource::Solar,
            IncomeLevel::Medium,
        )
        .unwrap()
    }

    fn combination() -> Combination {
        Combination::new(
            Action::new("Install rooftop panels", "Distributed Solar")
                .unwrap()
                .with_cost(-12.5)
                .with_ghg_impact("0.8"),
            Action::new("Eat less beef", "Plant-Rich Diets").unwrap(),
            profile("Berlin"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn loads_actions_with_textual_cost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.json");
        fs::write(
            &path,
            r#"[{"action": "Retrofit", "solution": "Insulation", "cost": "1,234.5", "sector": "  "}]"#,
        )
        .await
        .unwrap();

        let actions = JsonDatasetStore::new().load_actions(&path).await.unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].cost, Some(1234.5));
        assert_eq!(actions[0].sector, None);
    }

    #[tokio::test]
    async fn invalid_action_names_its_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.json");
        fs::write(
            &path,
            r#"[{"action": "a", "solution": "s"}, {"action": "b", "solution": "t", "cost": "lots"}]"#,
        )
        .await
        .unwrap();

        let err = JsonDatasetStore::new().load_actions(&path).await.unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { index: 1, .. }));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = JsonDatasetStore::new()
            .load_scored(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[tokio::test]
    async fn profiles_accept_both_shapes() {
        let dir = TempDir::new().unwrap();
        let store = JsonDatasetStore::new();
        let wrapped = dir.path().join("wrapped.json");
        let bare = dir.path().join("bare.json");

        store
            .save_profiles(&wrapped, &[profile("Berlin"), profile("Accra")])
            .await
            .unwrap();
        let written: Value =
            serde_json::from_slice(&fs::read(&wrapped).await.unwrap()).unwrap();
        assert!(written["profiles"].is_array());

        fs::write(&bare, serde_json::to_vec(&written["profiles"]).unwrap())
            .await
            .unwrap();

        let from_wrapped = store.load_profiles(&wrapped).await.unwrap();
        let from_bare = store.load_profiles(&bare).await.unwrap();
        assert_eq!(from_wrapped, from_bare);
        assert_eq!(from_wrapped[1].city, "Accra");
    }

    #[tokio::test]
    async fn scored_set_round_trips_every_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let store = JsonDatasetStore::new();
        let scored = vec![ScoredCombination::new(
            combination(),
            PreferenceLabel::FirstPreferred,
        )];

        store.save_scored(&path, &scored).await.unwrap();
        let loaded = store.load_scored(&path).await.unwrap();

        assert_eq!(loaded, scored);
        assert!(!temp_sibling(&path).exists());

        let raw: Value = serde_json::from_slice(&fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw[0]["score"], 1);
        assert_eq!(raw[0]["action_a"]["cost"], -12.5);
    }

    #[tokio::test]
    async fn work_set_entries_stay_untyped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("combinations.json");
        let store = JsonDatasetStore::new();

        store.save_work_set(&path, &[combination()]).await.unwrap();
        let records = store.load_work_set(&path).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(Combination::from_record(&records[0]).unwrap(), combination());
    }

    #[tokio::test]
    async fn non_array_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"score": 1}"#).await.unwrap();

        let err = JsonDatasetStore::new().load_scored(&path).await.unwrap_err();
        assert!(matches!(err, DatasetError::Deserialization { .. }));
    }
}
