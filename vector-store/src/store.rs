//! The vector store: an append-only corpus of embedded documents.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use ragdoc_embeddings::{DEFAULT_DIMENSION, Embedding};

use crate::error::{Result, StoreError};
use crate::flat_index::FlatIndex;
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot};

/// A search result: the matched document and its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Ordinal id of the document (insertion order, 0-based).
    pub id: usize,

    /// Squared L2 distance to the query.
    pub distance: f32,

    /// Document text.
    pub text: String,

    /// Filename label the document was ingested under.
    pub filename: String,
}

/// Owns the corpus of (vector, document, filename) triples and the flat
/// index built over the vectors.
///
/// Ids are ordinal positions: insertion order, stable within a store
/// instance. The three parallel sequences are only ever mutated through
/// [`append`](Self::append), which either commits to all of them or leaves
/// all of them untouched.
pub struct VectorStore {
    /// Document texts, id order.
    documents: Vec<String>,

    /// Filename labels, id order.
    filenames: Vec<String>,

    /// Flat index over the document vectors.
    index: FlatIndex,
}

impl VectorStore {
    /// Create an empty store with the default embedding dimension.
    ///
    /// The dimension is provisional: the first append fixes it to the
    /// appended vector's width.
    pub fn empty() -> Self {
        Self::with_dimension(DEFAULT_DIMENSION)
    }

    /// Create an empty store for vectors of the given width.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            documents: Vec::new(),
            filenames: Vec::new(),
            index: FlatIndex::new(dimension),
        }
    }

    /// Open a store from a snapshot path.
    ///
    /// A missing file yields an empty store with the default dimension. An
    /// existing file that cannot be parsed, or whose parallel sequences
    /// disagree, fails with [`StoreError::CorruptSnapshot`].
    ///
    /// [`StoreError::CorruptSnapshot`]: crate::error::StoreError::CorruptSnapshot
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !fs::try_exists(path).await? {
            info!(
                "Snapshot not found at {}, starting with an empty store",
                path.display()
            );
            return Ok(Self::empty());
        }

        let content = fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| StoreError::CorruptSnapshot(format!("{}: {e}", path.display())))?;
        snapshot.validate()?;

        let mut index = FlatIndex::new(snapshot.dimension);
        for vector in snapshot.vectors {
            index.add(vector)?;
        }

        info!(
            "Loaded {} documents from {}",
            index.count(),
            path.display()
        );

        Ok(Self {
            documents: snapshot.documents,
            filenames: snapshot.filenames,
            index,
        })
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.index.count()
    }

    /// Check if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Width of the stored vectors.
    ///
    /// Fixed once the store holds at least one document.
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// Append a document with its embedding, returning the assigned id.
    ///
    /// The first append on an empty store fixes the store dimension to the
    /// vector's width; afterwards a vector of any other width is rejected
    /// with `DimensionMismatch` and the store is left unchanged.
    pub fn append(
        &mut self,
        vector: Embedding,
        document: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<usize> {
        if self.index.is_empty() && vector.len() != self.index.dimension() {
            self.index = FlatIndex::new(vector.len());
        }

        // The index add validates the width; the infallible pushes below
        // commit the triple only after it succeeds.
        let id = self.index.add(vector)?;
        self.documents.push(document.into());
        let filename = filename.into();
        debug!("Added document '{filename}' to the vector store");
        self.filenames.push(filename);

        Ok(id)
    }

    /// Find the `top_k` documents nearest to `query`, closest first.
    ///
    /// An empty store yields an empty result for any `top_k`; a `top_k`
    /// larger than the document count is clamped. Ties are broken by lower
    /// id, so results are deterministic.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        let neighbors = self.index.search(query, top_k)?;

        Ok(neighbors
            .into_iter()
            .map(|n| SearchHit {
                id: n.id,
                distance: n.distance,
                text: self.documents[n.id].clone(),
                filename: self.filenames[n.id].clone(),
            })
            .collect())
    }

    /// Borrow a document text by id.
    pub fn document(&self, id: usize) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    /// Borrow a filename label by id.
    pub fn filename(&self, id: usize) -> Option<&str> {
        self.filenames.get(id).map(String::as_str)
    }

    /// Borrow a stored vector by id.
    pub fn vector(&self, id: usize) -> Option<&[f32]> {
        self.index.vector(id)
    }

    /// Write a snapshot of the full store state to `path`.
    ///
    /// Creates parent directories as needed and overwrites any existing
    /// file. The write goes through a temp file and rename so a crash never
    /// leaves a half-written snapshot behind. In-memory state is untouched.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            dimension: self.index.dimension(),
            vectors: self.index.vectors().to_vec(),
            documents: self.documents.clone(),
            filenames: self.filenames.clone(),
        };
        let content = serde_json::to_string(&snapshot)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &path).await?;

        info!(
            "Persisted {} documents to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }
}
