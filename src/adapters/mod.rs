//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the pipeline to external systems:
//! - `ai` - Language model providers (OpenAI, mock)
//! - `oracle` - Pair judgment on top of an AI provider
//! - `profile` - Persona synthesis on top of an AI provider
//! - `storage` - Dataset documents (JSON files, in-memory)

pub mod ai;
pub mod oracle;
pub mod profile;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use oracle::{LlmScoringOracle, MockScoringOracle};
pub use profile::LlmProfileSynthesizer;
pub use storage::{InMemoryDatasetStore, JsonDatasetStore};
