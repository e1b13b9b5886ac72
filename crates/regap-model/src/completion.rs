//! Typed client for the text-generation service.
//!
//! Speaks the messages shape: `POST {base}/v1/messages` with a single user
//! message, answered by `{"content": [{"type": "text", "text": ...}]}`.
//! Multiple text blocks in the response are concatenated.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::CompletionModel;

const ENDPOINT: &str = "POST /v1/messages";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the text-generation service.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: url::Url,
    model: String,
}

impl CompletionClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, model: String) -> Self {
        Self {
            http,
            base_url,
            model,
        }
    }
}

impl CompletionModel for CompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError> {
        let url = format!("{}v1/messages", self.base_url);
        let req = CompletionRequest {
            model: &self.model,
            max_tokens,
            temperature,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
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

        let decoded: CompletionResponse =
            resp.json().await.map_err(|e| ModelError::Deserialization {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if decoded.content.is_empty() {
            return Err(ModelError::UnexpectedShape {
                endpoint: ENDPOINT.into(),
                reason: "empty content array".into(),
            });
        }

        Ok(decoded
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
