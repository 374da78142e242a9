//! Errors that abort a pipeline stage.
//!
//! Per-item scoring failures are not here; the scorer counts them instead.

use std::path::PathBuf;

use crate::domain::augmentation::AugmentError;
use crate::ports::{DatasetError, SynthesisError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Augment(#[from] AugmentError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// A stage was asked to overwrite its own input.
    #[error("Input and output must be different documents: {}", .0.display())]
    SameArtifact(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_artifact_names_the_path() {
        let err = PipelineError::SameArtifact(PathBuf::from("data/scores.json"));
        assert_eq!(
            err.to_string(),
            "Input and output must be different documents: data/scores.json"
        );
    }

    #[test]
    fn dataset_errors_pass_through() {
        let err: PipelineError = DatasetError::NotFound(PathBuf::from("x.json")).into();
        assert_eq!(err.to_string(), "Document not found: x.json");
    }
}
