//! LLM invocation boundary
//!
//! One required capability: generate text from a prompt with the given
//! decoding parameters. Concrete adapters implement [`LlmClient`] per
//! supported model runtime; callers never inspect response shapes.

use async_trait::async_trait;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaClient;

/// Decoding parameters for one generation call
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Model identifier passed to the runtime
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum decode tokens
    pub max_tokens: u32,
}

/// Errors from the model-runtime boundary.
///
/// Unlike the price adapters there is no fallback value here: a failed
/// generation propagates and aborts the planning run.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model runtime returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid response from model runtime: {0}")]
    InvalidResponse(String),
}

/// Stateless language-model client. Each call is independent; no
/// conversation state is kept between calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the generated text
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock LLM client returning canned responses in order
    pub struct MockLlmClient {
        responses: Mutex<Vec<String>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<String>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(LlmError::InvalidResponse(
                    "no more mock responses".to_string(),
                ));
            }
            Ok(responses.remove(0))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockLlmClient::new(vec!["first".to_string(), "second".to_string()]);
            let params = GenerationParams {
                model: "gemma:2b".to_string(),
                temperature: 0.7,
                max_tokens: 64,
            };

            assert_eq!(client.generate("a", &params).await.unwrap(), "first");
            assert_eq!(client.generate("b", &params).await.unwrap(), "second");
            assert!(client.generate("c", &params).await.is_err());
        }
    }
}
