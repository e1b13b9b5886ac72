//! Model service configuration.
//!
//! One explicit configuration object, constructed once at process start and
//! passed into the components that need it. Defaults suit a local
//! deployment; override via environment variables.

use url::Url;

/// Configuration for the embedding and completion services.
///
/// Custom `Debug` implementation redacts the `api_key` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct ModelConfig {
    /// Base URL of the embeddings service.
    pub embeddings_url: Url,
    /// Base URL of the text-generation service.
    pub completion_url: Url,
    /// Bearer token for both services.
    pub api_key: String,
    /// Embedding model identifier sent with each request.
    pub embedding_model: String,
    /// Completion model identifier sent with each request.
    pub completion_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("embeddings_url", &self.embeddings_url)
            .field("completion_url", &self.completion_url)
            .field("api_key", &"[REDACTED]")
            .field("embedding_model", &self.embedding_model)
            .field("completion_model", &self.completion_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ModelConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGAP_EMBEDDINGS_URL` (default: `http://127.0.0.1:8080`)
    /// - `REGAP_COMPLETION_URL` (default: `http://127.0.0.1:8081`)
    /// - `REGAP_API_KEY` (required)
    /// - `REGAP_EMBEDDING_MODEL` (default: `all-minilm-l6-v2`)
    /// - `REGAP_COMPLETION_MODEL` (default: `claude-3-5-sonnet`)
    /// - `REGAP_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("REGAP_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            embeddings_url: env_url("REGAP_EMBEDDINGS_URL", "http://127.0.0.1:8080")?,
            completion_url: env_url("REGAP_COMPLETION_URL", "http://127.0.0.1:8081")?,
            api_key,
            embedding_model: env_or("REGAP_EMBEDDING_MODEL", "all-minilm-l6-v2"),
            completion_model: env_or("REGAP_COMPLETION_MODEL", "claude-3-5-sonnet"),
            timeout_secs: std::env::var("REGAP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API key environment variable is unset.
    #[error("REGAP_API_KEY environment variable is required")]
    MissingApiKey,

    /// The API key cannot be placed in an HTTP header.
    #[error("API key contains characters not permitted in an HTTP header")]
    InvalidApiKey,

    /// A URL variable failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
