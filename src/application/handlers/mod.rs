//! Command handlers, one per pipeline stage.

mod generate_combinations;
mod mirror_scores;
mod run_pipeline;
mod score_combinations;
mod synthesize_profiles;

use std::path::{Component, Path, PathBuf};

use crate::application::PipelineError;

pub use generate_combinations::{
    GenerateCombinationsCommand, GenerateCombinationsHandler, GenerateCombinationsResult,
};
pub use mirror_scores::{MirrorScoresCommand, MirrorScoresHandler, MirrorScoresResult};
pub use run_pipeline::{RunPipelineCommand, RunPipelineHandler, RunPipelineResult};
pub use score_combinations::{ScoreCombinationsCommand, ScoreCombinationsHandler};
pub use synthesize_profiles::{SynthesizeProfilesCommand, SynthesizeProfilesHandler};

/// Refuses to let a stage overwrite one of its inputs.
async fn ensure_distinct(input: &Path, output: &Path) -> Result<(), PipelineError> {
    if resolve(input).await == resolve(output).await {
        return Err(PipelineError::SameArtifact(output.to_path_buf()));
    }
    Ok(())
}

/// Canonical location of a document that may not exist yet: the parent
/// directory is canonicalized when it exists, otherwise `.` segments are
/// dropped lexically.
async fn resolve(path: &Path) -> PathBuf {
    let lexical: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let (Some(parent), Some(name)) = (lexical.parent(), lexical.file_name()) else {
        return lexical;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    match tokio::fs::canonicalize(parent).await {
        Ok(dir) => dir.join(name),
        Err(_) => lexical,
    }
}
