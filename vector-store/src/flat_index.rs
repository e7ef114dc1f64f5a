//! Flat index: exhaustive squared-L2 search over raw vectors.

use ordered_float::OrderedFloat;
use tracing::debug;

use ragdoc_embeddings::{Embedding, squared_l2};

use crate::error::{Result, StoreError};

/// A single search hit: position of the vector and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Ordinal id of the matched vector (insertion order, 0-based).
    pub id: usize,

    /// Squared L2 distance to the query.
    pub distance: f32,
}

/// An exact nearest-neighbor index with no pruning structure.
///
/// Vectors are appended to a growable array and every search compares the
/// query against all of them. Search cost is O(count × dimension); append is
/// amortized O(dimension). Given the same vectors and query, `search`
/// returns the same ids on every call — ties are broken by lower id.
pub struct FlatIndex {
    /// Stored vectors, id = position.
    vectors: Vec<Embedding>,

    /// Expected width of every vector.
    dimension: usize,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given width.
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: Vec::new(),
            dimension,
        }
    }

    /// Width of the vectors this index accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    pub fn count(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector, returning its assigned id.
    pub fn add(&mut self, vector: Embedding) -> Result<usize> {
        if vector.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let id = self.vectors.len();
        self.vectors.push(vector);
        debug!("Added vector {id} to flat index");
        Ok(id)
    }

    /// Find the `k` nearest vectors to `query`, closest first.
    ///
    /// Returns fewer than `k` results when the index holds fewer vectors.
    /// An empty index yields an empty result for any `k`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }

        if query.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<(OrderedFloat<f32>, usize)> = Vec::with_capacity(self.vectors.len());
        for (id, vector) in self.vectors.iter().enumerate() {
            // Stored widths match self.dimension; enforced on add.
            let distance =
                squared_l2(query, vector).map_err(|_| StoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: query.len(),
                })?;
            hits.push((OrderedFloat(distance), id));
        }

        // Ascending distance, ties broken by lower id.
        hits.sort_unstable();
        hits.truncate(k);

        Ok(hits
            .into_iter()
            .map(|(distance, id)| Neighbor {
                id,
                distance: distance.0,
            })
            .collect())
    }

    /// Borrow a stored vector by id.
    pub fn vector(&self, id: usize) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }

    /// Borrow all stored vectors in id order.
    pub fn vectors(&self) -> &[Embedding] {
        &self.vectors
    }
}
