//! Error types for the vector store.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the vector store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persisted snapshot is malformed or internally inconsistent.
    ///
    /// Fatal to store construction; snapshots are never auto-repaired.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Vector width disagrees with the store dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
