//! MirrorScoresHandler - Writes the symmetry-augmented scored set.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::augmentation::SymmetryAugmenter;
use crate::ports::DatasetStore;

use super::ensure_distinct;

/// Command to augment a scored set into a separate document.
#[derive(Debug, Clone)]
pub struct MirrorScoresCommand {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorScoresResult {
    pub original: usize,
    pub augmented: usize,
}

pub struct MirrorScoresHandler {
    store: Arc<dyn DatasetStore>,
    augmenter: SymmetryAugmenter,
}

impl MirrorScoresHandler {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self {
            store,
            augmenter: SymmetryAugmenter::new(),
        }
    }

    pub async fn handle(&self, cmd: MirrorScoresCommand) -> Result<MirrorScoresResult, PipelineError> {
        ensure_distinct(&cmd.input_path, &cmd.output_path).await?;

        let scored = self.store.load_scored(&cmd.input_path).await?;
        let augmented = self.augmenter.augment(&scored)?;
        self.store.save_scored(&cmd.output_path, &augmented).await?;

        tracing::info!(
            original = scored.len(),
            augmented = augmented.len(),
            output = %cmd.output_path.display(),
            "Mirrored set written"
        );

        Ok(MirrorScoresResult {
            original: scored.len(),
            augmented: augmented.len(),
        })
    }
}
