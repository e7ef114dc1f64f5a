//! Distance computation for embeddings.

use crate::error::{EmbeddingError, Result};

/// Compute the squared euclidean (L2) distance between two embeddings.
///
/// Squaring preserves the ranking of plain L2 distance while skipping the
/// square root, so this is the form the flat index ranks by.
pub fn squared_l2(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum())
}
