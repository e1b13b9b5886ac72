//! Model service error taxonomy.
//!
//! Two kinds matter to callers: *transient* failures worth retrying
//! (transport errors, rate limits, server faults) and *permanent* ones
//! (validation, auth, undecodable responses). This crate classifies;
//! retry policy belongs to the orchestrator.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the embedding or completion services.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Client configuration problem.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("http error calling {endpoint}: {source}")]
    Http {
        /// The logical endpoint being called.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{endpoint} returned status {status}: {body}")]
    Api {
        /// The logical endpoint being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {endpoint} response: {source}")]
    Deserialization {
        /// The logical endpoint being called.
        endpoint: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The response decoded but did not carry the expected payload.
    #[error("unexpected {endpoint} response shape: {reason}")]
    UnexpectedShape {
        /// The logical endpoint being called.
        endpoint: String,
        /// What was wrong with the payload.
        reason: String,
    },
}

impl ModelError {
    /// Whether a bounded retry with backoff is worthwhile.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::Api { status, .. } => {
                matches!(status, 408 | 429) || *status >= 500
            }
            Self::Config(_) | Self::Deserialization { .. } | Self::UnexpectedShape { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ModelError {
        ModelError::Api {
            endpoint: "POST /v1/messages".into(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn rate_limits_and_server_faults_are_transient() {
        assert!(api(429).is_transient());
        assert!(api(408).is_transient());
        assert!(api(500).is_transient());
        assert!(api(503).is_transient());
    }

    #[test]
    fn validation_and_auth_are_permanent() {
        assert!(!api(400).is_transient());
        assert!(!api(401).is_transient());
        assert!(!api(422).is_transient());
    }

    #[test]
    fn config_errors_are_permanent() {
        assert!(!ModelError::Config(ConfigError::MissingApiKey).is_transient());
    }
}
