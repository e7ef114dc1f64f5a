//! # Retrieval Pipeline
//!
//! This crate orchestrates the ragdoc retrieval core:
//!
//! - **Embeddings**: query and document vectors via [`TextEmbedder`]
//! - **Vector Store**: exact nearest-neighbor search over the corpus
//! - **Generation**: grounded answers via [`TextGenerator`]
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    RetrievalPipeline                       │
//! ├────────────────────────────────────────────────────────────┤
//! │                                                            │
//! │  query ──► TextEmbedder ──► VectorStore.search(top_k)      │
//! │                                   │                        │
//! │                                   ▼                        │
//! │                          prompt assembly                   │
//! │                                   │                        │
//! │                                   ▼                        │
//! │                           TextGenerator ──► answer         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Document ingestion runs offline: [`ingest_directory`] embeds a directory
//! of `.txt` files in one batch and persists a store snapshot the pipeline
//! later opens.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use ragdoc_retrieval::{HttpGenerator, RetrievalConfig, RetrievalPipeline};
//! use ragdoc_embeddings::HttpEmbedder;
//!
//! let config = RetrievalConfig::new("data/embeddings.json");
//! let embedder = Arc::new(HttpEmbedder::new("http://localhost:8080/v1"));
//! let generator = Arc::new(HttpGenerator::new("http://localhost:8081/v1"));
//!
//! let pipeline = RetrievalPipeline::open(config, embedder, generator).await?;
//! let answer = pipeline.answer("What are mammals?").await?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod pipeline;
pub mod prompt;

pub use config::{DEFAULT_TOP_K, RetrievalConfig};
pub use error::{Result, RetrievalError};
pub use generator::{GenerationParams, GeneratorError, HttpGenerator, TextGenerator};
pub use ingest::{IngestStats, ingest_directory};
pub use pipeline::RetrievalPipeline;
pub use prompt::build_prompt;

// Re-export from dependencies for convenience
pub use ragdoc_embeddings::{Embedding, HttpEmbedder, TextEmbedder};
pub use ragdoc_vector_store::{SearchHit, VectorStore};
