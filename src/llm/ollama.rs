//! Ollama HTTP client implementation
//!
//! Implements [`LlmClient`] against the Ollama `/api/generate` endpoint with
//! non-streaming decoding. One round trip per call; latency is dominated by
//! decode length.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::{GenerationParams, LlmClient, LlmError};
use crate::config::LlmConfig;

/// Client for an Ollama-compatible model runtime
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

/// Request body for `/api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Decoding options understood by Ollama
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body for a non-streaming `/api/generate` call
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new client from the LLM configuration
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %params.model, max_tokens = params.max_tokens))]
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &params.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };

        debug!(prompt_len = prompt.len(), "Sending generation request");
        let start = std::time::Instant::now();

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Model runtime returned an error");
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        info!(
            "Generated {} chars in {:.1}s",
            generated.response.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(generated.response)
    }
}
