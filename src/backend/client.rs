//! HTTP client for the commit-message generation backend.
//!
//! The backend is an opaque endpoint: POST a JSON body with the raw diff,
//! get back a JSON body with the generated message. One attempt per call,
//! no retries; the caller decides whether to re-invoke.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coordinator::MessageGenerator;
use crate::error::GenerationError;

/// The generation endpoint. The sole build-time constant of the crate.
const BACKEND_URL: &str =
    "https://commit-generator-ai-backend.onrender.com/generator/generate-commit-message";

/// Default request timeout (60 seconds; generation can be slow).
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default request timeout.
const TIMEOUT_ENV_VAR: &str = "COMMITGEN_HTTP_TIMEOUT";

fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Wire payload sent to the backend.
///
/// `is_pair` is reserved for a pairing mode this tool does not use and is
/// always `false`.
#[derive(Debug, Serialize)]
struct GenerationRequest {
    #[serde(rename = "plainText")]
    plain_text: String,
    #[serde(rename = "isPair")]
    is_pair: bool,
}

/// Wire payload returned by the backend on success.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(rename = "aiResponse")]
    ai_response: String,
}

/// Client for the generation endpoint.
pub struct GenerationClient {
    client: Client,
    url: String,
}

impl GenerationClient {
    /// Create a client against the production endpoint.
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_url(BACKEND_URL.to_string())
    }

    /// Create a client against a specific endpoint URL. Exists for tests
    /// pointing at a mock server.
    pub fn with_url(url: String) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(get_timeout())
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self { client, url })
    }

    /// Submit a diff and return the generated commit message.
    pub async fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            plain_text: diff.to_string(),
            is_pair: false,
        };

        debug!(url = %self.url, diff_bytes = diff.len(), "submitting diff to backend");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Body is opaque diagnostic text here, not guaranteed JSON.
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let parsed: GenerationResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        Ok(parsed.ai_response)
    }
}

#[async_trait]
impl MessageGenerator for GenerationClient {
    async fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        GenerationClient::generate(self, diff).await
    }
}
