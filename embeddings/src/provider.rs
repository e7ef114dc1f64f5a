//! Embedding providers.
//!
//! The embedding model itself is an external capability. This module defines
//! the contract the retrieval core programs against and an HTTP adapter for
//! OpenAI-compatible embedding endpoints (including local inference servers
//! that speak the same protocol).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Trait for embedding providers.
///
/// Implementations must be deterministic: embedding the same text twice
/// yields the same vector, so search results are reproducible.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Width of the vectors this provider produces.
    fn dimension(&self) -> usize;

    /// Generate embeddings for multiple texts in one call.
    ///
    /// Returns one vector per input text, in input order, each of width
    /// [`dimension`](Self::dimension).
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected 1 embedding, got {}",
                vectors.len()
            )));
        }
        vectors.pop().ok_or_else(|| {
            EmbeddingError::InvalidResponse("no embedding in response".to_string())
        })
    }
}

/// Embedding provider backed by an OpenAI-compatible `/embeddings` endpoint.
pub struct HttpEmbedder {
    /// API base URL.
    base_url: String,

    /// API key, sent as a bearer token when present. Local inference
    /// servers typically run unauthenticated.
    api_key: Option<String>,

    /// Model name sent with each request.
    model: String,

    /// Expected output width.
    dimension: usize,

    /// HTTP client.
    client: reqwest::Client,
}

impl HttpEmbedder {
    /// Create a new embedder against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: "all-MiniLM-L6-v2".to_string(),
            dimension: crate::DEFAULT_DIMENSION,
            client: reqwest::Client::new(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected output width.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

#[async_trait]
impl TextEmbedder for HttpEmbedder {
    fn name(&self) -> &str {
        "http"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "Generating embeddings for {} text(s) with model: {}",
            texts.len(),
            self.model
        );

        let body = serde_json::json!({
            "input": texts,
            "model": self.model,
        });

        let mut request = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: ApiEmbeddingResponse = response.json().await?;

        if result.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                result.data.len()
            )));
        }

        let mut vectors = Vec::with_capacity(result.data.len());
        for item in result.data {
            if item.embedding.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimension,
                    actual: item.embedding.len(),
                });
            }
            vectors.push(item.embedding);
        }

        info!("Generated {} embeddings", vectors.len());
        Ok(vectors)
    }
}

/// Embeddings API response format.
#[derive(Debug, Deserialize)]
struct ApiEmbeddingResponse {
    data: Vec<ApiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct ApiEmbeddingData {
    embedding: Vec<f32>,
    #[allow(dead_code)]
    index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(serde_json::json!({
                "model": "all-MiniLM-L6-v2",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"embedding": [1.0, 0.0, 0.0], "index": 0},
                    {"embedding": [0.0, 1.0, 0.0], "index": 1},
                ],
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri()).with_dimension(3);
        let texts = vec!["first".to_string(), "second".to_string()];
        let vectors = embedder.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vec![1.0, 0.0, 0.0]);
        assert_eq!(vectors[1], vec![0.0, 1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_embed_single_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.5, 0.5], "index": 0}],
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri()).with_dimension(2);
        let vector = embedder.embed("hello").await.unwrap();
        assert_eq!(vector, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        // No mock mounted: a request would fail the test with a connect error.
        let embedder = HttpEmbedder::new("http://127.0.0.1:9");
        let vectors = embedder.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri());
        let result = embedder.embed_batch(&["text".to_string()]).await;
        assert!(matches!(result, Err(EmbeddingError::ApiRequest(_))));
    }

    #[tokio::test]
    async fn test_wrong_width_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [1.0, 2.0], "index": 0}],
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri()).with_dimension(3);
        let result = embedder.embed_batch(&["text".to_string()]).await;
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
