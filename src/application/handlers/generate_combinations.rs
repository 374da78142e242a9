//! GenerateCombinationsHandler - Builds the unscored work set.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::generator::CombinationGenerator;
use crate::ports::DatasetStore;

use super::ensure_distinct;

/// Command to generate the work set from the action and persona documents.
#[derive(Debug, Clone)]
pub struct GenerateCombinationsCommand {
    pub actions_path: PathBuf,
    pub profiles_path: PathBuf,
    pub output_path: PathBuf,
    /// Skip actions without GHG impact data.
    pub require_ghg_impact: bool,
}

/// Result of work-set generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCombinationsResult {
    pub actions: usize,
    pub profiles: usize,
    pub combinations: usize,
}

/// Handler for work-set generation.
pub struct GenerateCombinationsHandler {
    store: Arc<dyn DatasetStore>,
    generator: CombinationGenerator,
}

impl GenerateCombinationsHandler {
    pub fn new(store: Arc<dyn DatasetStore>, generator: CombinationGenerator) -> Self {
        Self { store, generator }
    }

    pub async fn handle(
        &self,
        cmd: GenerateCombinationsCommand,
    ) -> Result<GenerateCombinationsResult, PipelineError> {
        ensure_distinct(&cmd.actions_path, &cmd.output_path).await?;
        ensure_distinct(&cmd.profiles_path, &cmd.output_path).await?;

        let mut actions = self.store.load_actions(&cmd.actions_path).await?;
        if cmd.require_ghg_impact {
            let before = actions.len();
            actions.retain(|action| action.has_ghg_impact());
            tracing::info!(
                kept = actions.len(),
                dropped = before - actions.len(),
                "Filtered actions without GHG impact data"
            );
        }

        let profiles = self.store.load_profiles(&cmd.profiles_path).await?;
        let work_set = self.generator.generate(&actions, &profiles);
        self.store.save_work_set(&cmd.output_path, &work_set).await?;

        tracing::info!(
            actions = actions.len(),
            profiles = profiles.len(),
            combinations = work_set.len(),
            output = %cmd.output_path.display(),
            "Work set written"
        );

        Ok(GenerateCombinationsResult {
            actions: actions.len(),
            profiles: profiles.len(),
            combinations: work_set.len(),
        })
    }
}
