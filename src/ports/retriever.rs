//! Retriever Port - Boundary contract of the document retrieval subsystem.
//!
//! Retrieval (chunking, embedding, nearest-neighbour query) lives outside
//! this crate. Implementations return chunks ordered by ascending cosine
//! distance and drop anything at or above the cutoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cosine distance at or above which a chunk is considered irrelevant.
pub const DEFAULT_MAX_DISTANCE: f32 = 0.5;

/// One retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text.
    pub document: String,
    /// Where the chunk came from.
    pub source: SourceMetadata,
    /// Cosine distance to the query.
    pub distance: f32,
}

/// Provenance of a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Path of the source document relative to the corpus root.
    pub source: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("index query failed: {0}")]
    Query(String),
}

/// Port for semantic retrieval.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns at most `top_k` chunks closer than the cutoff, nearest first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError>;
}

/// Applies the contract to raw nearest-neighbour results: sorts by distance,
/// drops chunks at or beyond `max_distance`, and truncates to `top_k`.
pub fn within_cutoff(
    mut chunks: Vec<RetrievedChunk>,
    top_k: usize,
    max_distance: f32,
) -> Vec<RetrievedChunk> {
    chunks.retain(|c| c.distance < max_distance);
    chunks.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    chunks.truncate(top_k);
    chunks
}
