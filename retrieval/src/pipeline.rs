//! The retrieval pipeline: query → retrieve → prompt → generate.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use ragdoc_embeddings::TextEmbedder;
use ragdoc_vector_store::VectorStore;

use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::generator::TextGenerator;
use crate::prompt::build_prompt;

/// Turns a user query into a generated answer grounded in retrieved context.
///
/// One long-lived instance holds the store and the two collaborator handles;
/// request handlers share it by reference. Store access follows a
/// single-writer/multi-reader discipline: searches take a read lock,
/// [`add_document`](Self::add_document) and [`persist`](Self::persist) take
/// the write lock. Embedder and generator calls never run while a lock is
/// held.
pub struct RetrievalPipeline {
    /// Pipeline configuration.
    config: RetrievalConfig,

    /// The document corpus.
    store: Arc<RwLock<VectorStore>>,

    /// Embedding provider.
    embedder: Arc<dyn TextEmbedder>,

    /// Generation provider.
    generator: Arc<dyn TextGenerator>,
}

impl RetrievalPipeline {
    /// Create a pipeline over an already-constructed store.
    pub fn new(
        config: RetrievalConfig,
        store: VectorStore,
        embedder: Arc<dyn TextEmbedder>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(store)),
            embedder,
            generator,
        }
    }

    /// Open a pipeline, loading the store from the configured snapshot path.
    ///
    /// A missing snapshot yields an empty store; see [`VectorStore::open`].
    pub async fn open(
        config: RetrievalConfig,
        embedder: Arc<dyn TextEmbedder>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        info!("Initializing retrieval pipeline");
        let store = VectorStore::open(&config.snapshot_path).await?;
        Ok(Self::new(config, store, embedder, generator))
    }

    /// Answer a query from the retrieved context.
    ///
    /// Fails with [`RetrievalError::EmptyQuery`] on an empty or
    /// whitespace-only query, before either collaborator is called. Never
    /// mutates the store; embedder or generator failures surface wrapped,
    /// without retries.
    pub async fn answer(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        let query_vector = self.embedder.embed(query).await?;

        let context: Vec<String> = {
            let store = self.store.read().await;
            store
                .search(&query_vector, self.config.top_k)?
                .into_iter()
                .map(|hit| hit.text)
                .collect()
        };
        debug!("Retrieved {} context documents", context.len());

        let prompt = build_prompt(&context, query);
        let output = self
            .generator
            .generate(&prompt, &self.config.generation)
            .await?;

        // Generators that echo the prompt get the prefix stripped back off;
        // if the output does not actually start with the prompt it is kept
        // whole rather than sliced blindly.
        let answer = if self.generator.echoes_prompt() {
            output.strip_prefix(&prompt).unwrap_or(&output)
        } else {
            &output
        };

        Ok(answer.trim().to_string())
    }

    /// Embed and append a single document, returning its assigned id.
    ///
    /// The embedder runs before the write lock is taken; the store is
    /// locked only for the append itself.
    pub async fn add_document(
        &self,
        text: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<usize> {
        let text = text.into();
        let vector = self.embedder.embed(&text).await?;

        let mut store = self.store.write().await;
        let id = store.append(vector, text, filename)?;
        Ok(id)
    }

    /// Snapshot the store to the configured path.
    ///
    /// Takes the write lock so the snapshot is a consistent point-in-time
    /// view.
    pub async fn persist(&self) -> Result<()> {
        let store = self.store.write().await;
        store.persist(&self.config.snapshot_path).await?;
        Ok(())
    }

    /// Number of documents currently in the store.
    pub async fn document_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<VectorStore>> {
        Arc::clone(&self.store)
    }
}
