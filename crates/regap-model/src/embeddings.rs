//! Typed client for the embeddings service.
//!
//! Speaks the OpenAI-compatible shape: `POST {base}/v1/embeddings` with
//! `{"model": ..., "input": [...]}`, answered by
//! `{"data": [{"embedding": [...]}, ...]}` in input order.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::Embedder;

const ENDPOINT: &str = "POST /v1/embeddings";

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingEntry {
    embedding: Vec<f32>,
}

/// Client for the embeddings service.
#[derive(Debug, Clone)]
pub struct EmbeddingsClient {
    http: reqwest::Client,
    base_url: url::Url,
    model: String,
}

impl EmbeddingsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, model: String) -> Self {
        Self {
            http,
            base_url,
            model,
        }
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let url = format!("{}v1/embeddings", self.base_url);
        let req = EmbeddingsRequest {
            model: &self.model,
            input,
        };

        let resp = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| ModelError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                endpoint: ENDPOINT.into(),
                status,
                body,
            });
        }

        let decoded: EmbeddingsResponse =
            resp.json().await.map_err(|e| ModelError::Deserialization {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if decoded.data.len() != input.len() {
            return Err(ModelError::UnexpectedShape {
                endpoint: ENDPOINT.into(),
                reason: format!(
                    "{} inputs produced {} embeddings",
                    input.len(),
                    decoded.data.len()
                ),
            });
        }

        Ok(decoded.data.into_iter().map(|e| e.embedding).collect())
    }
}

impl Embedder for EmbeddingsClient {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let input = [text.to_string()];
        let mut vectors = self.request(&input).await?;
        vectors.pop().ok_or_else(|| ModelError::UnexpectedShape {
            endpoint: ENDPOINT.into(),
            reason: "empty data array".into(),
        })
    }

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}
