//! HTTP client for an Ollama-compatible generate endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use wayfinder_core::{config::LlmConfig, Error, ModelBackend, Result};

/// Model backend speaking the Ollama generate protocol:
/// `POST {model, prompt, stream: false}` -> `{response: string}`.
pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaClient {
    /// Create a client with the bounded deadline from config.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| Error::internal(format!("failed to build model HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("model backend: {e}"))
    } else {
        Error::unavailable(format!("model backend: {e}"))
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let started = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?
            .error_for_status()
            .map_err(|e| {
                Error::unavailable(format!(
                    "model backend returned status {}",
                    e.status().map(|s| s.to_string()).unwrap_or_default()
                ))
            })?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::malformed_output(format!("model response body: {e}")))?;

        tracing::debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model completion received"
        );

        let text = body
            .response
            .ok_or_else(|| Error::malformed_output("model response missing 'response' field"))?;

        if text.trim().is_empty() {
            return Err(Error::malformed_output("model returned an empty completion"));
        }

        Ok(text)
    }
}
