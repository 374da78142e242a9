//! Profile adapters for persona synthesis

mod llm_synthesizer;

pub use llm_synthesizer::LlmProfileSynthesizer;
