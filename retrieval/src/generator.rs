//! Text generation providers.
//!
//! The generation model is an external capability. This module defines the
//! contract the pipeline programs against and an HTTP adapter for
//! OpenAI-compatible completion endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Result type alias for generation operations.
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while generating text.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Sampling parameters forwarded to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum length of the generated text, in tokens.
    pub max_length: usize,

    /// Whether to sample. When false the generator decodes greedily.
    pub do_sample: bool,

    /// Nucleus sampling probability mass.
    pub top_p: f32,

    /// Sample from the `top_k` most likely tokens.
    pub top_k: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            do_sample: true,
            top_p: 0.95,
            top_k: 60,
        }
    }
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Whether [`generate`](Self::generate) output begins with the prompt.
    ///
    /// Some generators echo the prompt before their continuation; others
    /// return the continuation only. The pipeline strips the prompt prefix
    /// exactly when this returns true, so implementations must report their
    /// actual convention.
    fn echoes_prompt(&self) -> bool {
        false
    }

    /// Generate a continuation for the given prompt.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> GeneratorResult<String>;
}

/// Generation provider backed by an OpenAI-compatible `/completions`
/// endpoint.
///
/// Completion endpoints return continuation-only text by default; when
/// built [`with_echo`](Self::with_echo) the `echo` flag is forwarded and
/// [`echoes_prompt`](TextGenerator::echoes_prompt) reports true so the
/// pipeline strips the prefix back off.
pub struct HttpGenerator {
    /// API base URL.
    base_url: String,

    /// API key, sent as a bearer token when present.
    api_key: Option<String>,

    /// Model name sent with each request.
    model: String,

    /// Ask the endpoint to echo the prompt before the continuation.
    echo: bool,

    /// HTTP client.
    client: reqwest::Client,
}

impl HttpGenerator {
    /// Create a new generator against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: "gpt2".to_string(),
            echo: false,
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

    /// Ask the endpoint to echo the prompt before the continuation.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "http"
    }

    fn echoes_prompt(&self) -> bool {
        self.echo
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> GeneratorResult<String> {
        debug!(
            "Generating completion with model: {} (max_length: {})",
            self.model, params.max_length
        );

        let mut body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": params.max_length,
            "top_p": params.top_p,
            "top_k": params.top_k,
            "echo": self.echo,
        });
        if !params.do_sample {
            body["temperature"] = serde_json::json!(0.0);
        }

        let mut request = self
            .client
            .post(format!("{}/completions", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: ApiCompletionResponse = response.json().await?;

        let text = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| {
                GeneratorError::InvalidResponse("no completion in response".to_string())
            })?;

        info!("Generated completion of {} characters", text.len());
        Ok(text)
    }
}

/// Completions API response format.
#[derive(Debug, Deserialize)]
struct ApiCompletionResponse {
    choices: Vec<ApiCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiCompletionChoice {
    text: String,
}
