//! Offline corpus ingestion.
//!
//! Builds a vector store snapshot from a flat directory of plain-text
//! documents, one `.txt` file per document, file content taken verbatim.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use ragdoc_embeddings::TextEmbedder;
use ragdoc_vector_store::VectorStore;

use crate::error::{Result, RetrievalError};

/// Statistics about an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    /// Number of documents ingested.
    pub documents: usize,

    /// Dimension of the resulting store.
    pub dimension: usize,
}

/// Embed every `.txt` file in `docs_dir` and persist the resulting store to
/// `snapshot_path`.
///
/// Enumeration is non-recursive and follows directory-listing order, which
/// is not guaranteed sorted; ids are reproducible within a single run only.
/// All documents are embedded in one batched call. A missing directory
/// fails with [`RetrievalError::DirectoryNotFound`]; a file that is not
/// valid UTF-8 fails with [`RetrievalError::DecodeError`] naming the file
/// and aborts the batch before anything is written.
pub async fn ingest_directory(
    docs_dir: impl AsRef<Path>,
    snapshot_path: impl AsRef<Path>,
    embedder: &dyn TextEmbedder,
) -> Result<IngestStats> {
    let docs_dir = docs_dir.as_ref();

    if !fs::try_exists(docs_dir).await? {
        return Err(RetrievalError::DirectoryNotFound(docs_dir.to_path_buf()));
    }

    info!("Loading documents from: {}", docs_dir.display());

    let mut documents = Vec::new();
    let mut filenames = Vec::new();

    let mut entries = fs::read_dir(docs_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if !path.extension().map_or(false, |ext| ext == "txt") {
            continue;
        }

        let bytes = fs::read(&path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|_| RetrievalError::DecodeError { path: path.clone() })?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Loaded document: {filename}");

        documents.push(text);
        filenames.push(filename);
    }

    info!("Loaded {} documents", documents.len());

    // One batched embedder call for the whole corpus.
    let vectors = embedder.embed_batch(&documents).await?;

    let mut store = VectorStore::empty();
    for ((vector, document), filename) in vectors
        .into_iter()
        .zip(documents.into_iter())
        .zip(filenames.into_iter())
    {
        store.append(vector, document, filename)?;
    }

    store.persist(snapshot_path).await?;

    Ok(IngestStats {
        documents: store.len(),
        dimension: store.dimension(),
    })
}
