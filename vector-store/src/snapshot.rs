//! Versioned on-disk snapshot of a vector store.
//!
//! A snapshot is a single JSON document holding the three parallel sequences
//! (vectors, document texts, filename labels) plus the dimension, sufficient
//! to reconstruct the store without re-running the embedder. The format is
//! self-describing and versioned; loaders reject snapshots they cannot
//! faithfully interpret rather than guessing.

use serde::{Deserialize, Serialize};

use ragdoc_embeddings::Embedding;

use crate::error::{Result, StoreError};

/// Current snapshot format version.
///
/// Version history:
/// - 1: initial format `{version, dimension, vectors, documents, filenames}`
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, for incompatibility detection.
    pub version: u32,

    /// Width of every vector.
    pub dimension: usize,

    /// Stored vectors, id order.
    pub vectors: Vec<Embedding>,

    /// Document texts, id order.
    pub documents: Vec<String>,

    /// Filename labels, id order.
    pub filenames: Vec<String>,
}

impl Snapshot {
    /// Check internal consistency.
    ///
    /// The three sequences must agree in length and every vector must have
    /// the declared width.
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::CorruptSnapshot(format!(
                "unsupported version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }

        if self.documents.len() != self.vectors.len()
            || self.filenames.len() != self.vectors.len()
        {
            return Err(StoreError::CorruptSnapshot(format!(
                "sequence counts disagree: {} vectors, {} documents, {} filenames",
                self.vectors.len(),
                self.documents.len(),
                self.filenames.len()
            )));
        }

        for (id, vector) in self.vectors.iter().enumerate() {
            if vector.len() != self.dimension {
                return Err(StoreError::CorruptSnapshot(format!(
                    "vector {id} has width {} (expected {})",
                    vector.len(),
                    self.dimension
                )));
            }
        }

        Ok(())
    }
}
