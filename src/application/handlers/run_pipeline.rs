//! RunPipelineHandler - generate, score and mirror in one pass.

use std::path::PathBuf;

use crate::application::scorer::ScoringReport;
use crate::application::PipelineError;

use super::{
    GenerateCombinationsCommand, GenerateCombinationsHandler, GenerateCombinationsResult,
    MirrorScoresCommand, MirrorScoresHandler, MirrorScoresResult, ScoreCombinationsCommand,
    ScoreCombinationsHandler,
};

#[derive(Debug, Clone)]
pub struct RunPipelineCommand {
    pub actions_path: PathBuf,
    pub profiles_path: PathBuf,
    pub work_set_path: PathBuf,
    pub scored_path: PathBuf,
    pub mirrored_path: PathBuf,
    pub require_ghg_impact: bool,
}

#[derive(Debug, Clone)]
pub struct RunPipelineResult {
    pub generated: GenerateCombinationsResult,
    pub scoring: ScoringReport,
    pub mirrored: MirrorScoresResult,
}

pub struct RunPipelineHandler {
    generate: GenerateCombinationsHandler,
    score: ScoreCombinationsHandler,
    mirror: MirrorScoresHandler,
}

impl RunPipelineHandler {
    pub fn new(
        generate: GenerateCombinationsHandler,
        score: ScoreCombinationsHandler,
        mirror: MirrorScoresHandler,
    ) -> Self {
        Self {
            generate,
            score,
            mirror,
        }
    }

    pub async fn handle(&self, cmd: RunPipelineCommand) -> Result<RunPipelineResult, PipelineError> {
        let generated = self
            .generate
            .handle(GenerateCombinationsCommand {
                actions_path: cmd.actions_path,
                profiles_path: cmd.profiles_path,
                output_path: cmd.work_set_path.clone(),
                require_ghg_impact: cmd.require_ghg_impact,
            })
            .await?;

        let scoring = self
            .score
            .handle(ScoreCombinationsCommand {
                input_path: cmd.work_set_path,
                output_path: cmd.scored_path.clone(),
            })
            .await?;

        let mirrored = self
            .mirror
            .handle(MirrorScoresCommand {
                input_path: cmd.scored_path,
                output_path: cmd.mirrored_path,
            })
            .await?;

        Ok(RunPipelineResult {
            generated,
            scoring,
            mirrored,
        })
    }
}
