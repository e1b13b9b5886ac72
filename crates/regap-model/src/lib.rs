//! # regap-model — External Model Service Clients
//!
//! Typed access to the two black-box services the pipeline consumes:
//!
//! - **Embeddings** — `embed_query(text) -> vector`,
//!   `embed_documents(texts) -> vectors` against an OpenAI-compatible
//!   `/v1/embeddings` endpoint.
//! - **Completion** — `complete(prompt, temperature, max_tokens) -> text`
//!   against a messages-style `/v1/messages` endpoint.
//!
//! ## Architecture
//!
//! The orchestrator never names these concrete clients: it is generic over
//! the [`Embedder`] and [`CompletionModel`] traits, so tests run against
//! scripted doubles and production wires in [`ModelClients`]. Configuration
//! is one explicit [`ModelConfig`] constructed at process start and passed
//! by reference — no module-level shared client state.
//!
//! ## Errors
//!
//! [`ModelError::is_transient`] separates retryable failures (transport,
//! rate limits, 5xx) from permanent ones (validation, auth). Retry policy
//! lives with the caller; this crate only classifies.

pub mod completion;
pub mod config;
pub mod embeddings;
pub mod error;

pub use completion::CompletionClient;
pub use config::{ConfigError, ModelConfig};
pub use embeddings::EmbeddingsClient;
pub use error::ModelError;

use std::time::Duration;

/// Anything that can embed text into the retrieval vector space.
#[allow(async_fn_in_trait)]
pub trait Embedder {
    /// Embed a single query text.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ModelError>;

    /// Embed a batch of corpus texts, one vector per input, in order.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError>;
}

/// Anything that can turn a prompt into generated text.
#[allow(async_fn_in_trait)]
pub trait CompletionModel {
    /// Run one completion call.
    async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError>;
}

/// Holds the two service clients behind one shared HTTP connection pool.
#[derive(Debug, Clone)]
pub struct ModelClients {
    embeddings: EmbeddingsClient,
    completion: CompletionClient,
}

impl ModelClients {
    /// Build both clients from configuration.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_key
                    ))
                    .map_err(|_| ModelError::Config(ConfigError::InvalidApiKey))?,
                );
                headers
            })
            .build()
            .map_err(|e| ModelError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            embeddings: EmbeddingsClient::new(
                http.clone(),
                config.embeddings_url,
                config.embedding_model,
            ),
            completion: CompletionClient::new(
                http,
                config.completion_url,
                config.completion_model,
            ),
        })
    }

    /// The embeddings client.
    pub fn embeddings(&self) -> &EmbeddingsClient {
        &self.embeddings
    }

    /// The completion client.
    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }
}
