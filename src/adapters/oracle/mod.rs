//! Scoring oracle adapters.
//!
//! - `LlmScoringOracle` - Pair judgment through an `AIProvider`
//! - `MockScoringOracle` - Deterministic oracle for tests and dry runs

mod llm_oracle;
mod mock_oracle;
mod prompt;

pub use llm_oracle::LlmScoringOracle;
pub use mock_oracle::MockScoringOracle;
pub(crate) use prompt::strip_code_fence;
