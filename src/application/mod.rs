//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each pipeline stage is one command handler; the concurrent scorer is the
//! engine behind the scoring stage.

mod error;
pub mod handlers;
pub mod scorer;

pub use error::PipelineError;
pub use handlers::{
    GenerateCombinationsCommand, GenerateCombinationsHandler, GenerateCombinationsResult,
    MirrorScoresCommand, MirrorScoresHandler, MirrorScoresResult, RunPipelineCommand,
    RunPipelineHandler, RunPipelineResult, ScoreCombinationsCommand, ScoreCombinationsHandler,
    SynthesizeProfilesCommand, SynthesizeProfilesHandler,
};
pub use scorer::{ConcurrentScorer, ItemFailure, ScoringReport, DEFAULT_CALL_TIMEOUT, DEFAULT_CONCURRENCY};
