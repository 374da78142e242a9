//! ScoreCombinationsHandler - Loads the work set, scores it, writes the scored set.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::scorer::{ConcurrentScorer, ScoringReport};
use crate::application::PipelineError;
use crate::ports::DatasetStore;

use super::ensure_distinct;

/// Command to score a work-set document.
#[derive(Debug, Clone)]
pub struct ScoreCombinationsCommand {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Handler for the scoring stage.
///
/// Item failures never fail the stage: whatever completed is written.
pub struct ScoreCombinationsHandler {
    store: Arc<dyn DatasetStore>,
    scorer: ConcurrentScorer,
}

impl ScoreCombinationsHandler {
    pub fn new(store: Arc<dyn DatasetStore>, scorer: ConcurrentScorer) -> Self {
        Self { store, scorer }
    }

    pub async fn handle(&self, cmd: ScoreCombinationsCommand) -> Result<ScoringReport, PipelineError> {
        ensure_distinct(&cmd.input_path, &cmd.output_path).await?;

        let records = self.store.load_work_set(&cmd.input_path).await?;
        let report = self.scorer.score(&records).await;
        self.store.save_scored(&cmd.output_path, &report.scored).await?;

        tracing::info!(
            run_id = %report.run_id,
            written = report.scored.len(),
            output = %cmd.output_path.display(),
            "Scored set written"
        );
        Ok(report)
    }
}
