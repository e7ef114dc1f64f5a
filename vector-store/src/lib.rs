//! # Vector Store
//!
//! This crate owns the corpus of embedded documents for ragdoc and answers
//! exact nearest-neighbor queries over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      VectorStore                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  documents  ──┐                                         │
//! │  filenames  ──┼── parallel sequences, id = position     │
//! │  FlatIndex  ──┘                                         │
//! │       │                                                 │
//! │       ▼                                                 │
//! │  Snapshot (versioned JSON on disk)                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The index is deliberately flat: vectors are stored raw and every search
//! is an exhaustive squared-L2 scan. The corpus sizes this system targets
//! (hundreds to low thousands of documents) make exact ranking cheaper than
//! maintaining an approximate structure.

pub mod error;
pub mod flat_index;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use flat_index::{FlatIndex, Neighbor};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use store::{SearchHit, VectorStore};
