//! Data document locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the pipeline documents live
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory holding every document
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_actions_file")]
    pub actions_file: String,

    #[serde(default = "default_profiles_file")]
    pub profiles_file: String,

    /// Unscored work set
    #[serde(default = "default_combinations_file")]
    pub combinations_file: String,

    /// Scored set
    #[serde(default = "default_scores_file")]
    pub scores_file: String,

    /// Symmetry-augmented scored set
    #[serde(default = "default_mirrored_file")]
    pub mirrored_file: String,
}

impl DataConfig {
    pub fn actions_path(&self) -> PathBuf {
        self.dir.join(&self.actions_file)
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.dir.join(&self.profiles_file)
    }

    pub fn combinations_path(&self) -> PathBuf {
        self.dir.join(&self.combinations_file)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.dir.join(&self.scores_file)
    }

    pub fn mirrored_path(&self) -> PathBuf {
        self.dir.join(&self.mirrored_file)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let files = [
            ("actions_file", &self.actions_file),
            ("profiles_file", &self.profiles_file),
            ("combinations_file", &self.combinations_file),
            ("scores_file", &self.scores_file),
            ("mirrored_file", &self.mirrored_file),
        ];

        for (name, file) in files {
            if file.trim().is_empty() {
                return Err(ValidationError::EmptyFileName(name));
            }
        }
        for (i, (first, a)) in files.iter().enumerate() {
            for (second, b) in &files[i + 1..] {
                if a == b {
                    return Err(ValidationError::DuplicateFileName(*first, *second));
                }
            }
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            actions_file: default_actions_file(),
            profiles_file: default_profiles_file(),
            combinations_file: default_combinations_file(),
            scores_file: default_scores_file(),
            mirrored_file: default_mirrored_file(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_actions_file() -> String {
    "actions.json".to_string()
}

fn default_profiles_file() -> String {
    "synthetic_profiles.json".to_string()
}

fn default_combinations_file() -> String {
    "synthetic_action_combinations.json".to_string()
}

fn default_scores_file() -> String {
    "synthetic_action_pair_scores.json".to_string()
}

fn default_mirrored_file() -> String {
    "synthetic_action_pair_scores_mirrored.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_the_data_dir() {
        let config = DataConfig::default();
        assert_eq!(config.actions_path(), PathBuf::from("data/actions.json"));
        assert_eq!(
            config.scores_path(),
            PathBuf::from("data/synthetic_action_pair_scores.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scored_and_mirrored_must_differ() {
        let config = DataConfig {
            mirrored_file: "synthetic_action_pair_scores.json".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateFileName("scores_file", "mirrored_file"))
        );
    }

    #[test]
    fn blank_file_name_rejected() {
        let config = DataConfig {
            profiles_file: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyFileName("profiles_file"))
        );
    }
}
