//! Error types for the retrieval pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::generator::GeneratorError;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval pipeline.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Query was empty or whitespace-only.
    ///
    /// Rejected before any collaborator is called.
    #[error("query is empty")]
    EmptyQuery,

    /// The embedder failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] ragdoc_embeddings::EmbeddingError),

    /// The generator failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GeneratorError),

    /// Vector store error.
    #[error("store error: {0}")]
    Store(#[from] ragdoc_vector_store::StoreError),

    /// Ingestion directory does not exist.
    #[error("documents directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A document file is not valid UTF-8.
    ///
    /// Aborts the whole batch; documents are never silently skipped.
    #[error("invalid UTF-8 in document: {}", .path.display())]
    DecodeError { path: PathBuf },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
