//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the pipeline and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat completion against a language model
//! - `ScoringOracle` - Binary pair judgment for one persona
//! - `ProfileSynthesizer` - Synthetic persona generation
//! - `DatasetStore` - Flat document persistence
//! - `Retriever` - Boundary contract of the retrieval subsystem

mod ai_provider;
mod dataset_store;
mod profile_synthesizer;
mod retriever;
mod scoring_oracle;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};
pub use dataset_store::{DatasetError, DatasetStore};
pub use profile_synthesizer::{ProfileSynthesizer, SynthesisError};
pub use retriever::{
    within_cutoff, RetrievalError, RetrievedChunk, Retriever, SourceMetadata, DEFAULT_MAX_DISTANCE,
};
pub use scoring_oracle::{OracleError, ScoringOracle, ScoringRequest};
