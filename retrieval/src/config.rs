//! Configuration for the retrieval pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::generator::GenerationParams;

/// Number of documents retrieved per query by default.
pub const DEFAULT_TOP_K: usize = 3;

/// Configuration for the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Path of the vector store snapshot.
    pub snapshot_path: PathBuf,

    /// Number of documents retrieved per query.
    pub top_k: usize,

    /// Sampling parameters forwarded to the generator.
    pub generation: GenerationParams,
}

impl RetrievalConfig {
    /// Create a new configuration with default values.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            top_k: DEFAULT_TOP_K,
            generation: GenerationParams::default(),
        }
    }

    /// Set the number of documents retrieved per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the generation parameters.
    pub fn with_generation(mut self, params: GenerationParams) -> Self {
        self.generation = params;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new(
            dirs::data_dir()
                .unwrap_or_default()
                .join("ragdoc/embeddings.json"),
        )
    }
}
