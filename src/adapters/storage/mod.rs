//! Storage Adapters
//!
//! Implementations of the DatasetStore port.
//!
//! ## Available Adapters
//!
//! - **JsonDatasetStore** - Flat JSON documents on disk
//! - **InMemoryDatasetStore** - Documents in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryDatasetStore, JsonDatasetStore};
//!
//! // Production: file-based storage
//! let store = JsonDatasetStore::new();
//!
//! // Testing: in-memory storage
//! let store = InMemoryDatasetStore::new();
//! ```

mod in_memory_dataset_store;
mod json_dataset_store;

pub use in_memory_dataset_store::InMemoryDatasetStore;
pub use json_dataset_store::JsonDatasetStore;
