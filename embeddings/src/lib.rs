//! # Embeddings
//!
//! This crate turns text into fixed-width dense vectors for the ragdoc
//! retrieval core.
//!
//! It defines the [`TextEmbedder`] contract (one vector per input text, same
//! order, deterministic for identical input), an HTTP-backed implementation
//! for OpenAI-compatible embedding endpoints, and the distance function the
//! vector store ranks by.

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{HttpEmbedder, TextEmbedder};
pub use similarity::squared_l2;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Output width of the default embedding model (all-MiniLM-L6-v2).
pub const DEFAULT_DIMENSION: usize = 384;
