//! Pure OpenAI REST API client
//!
//! A minimal client for the OpenAI chat completion API with no domain-specific
//! logic, plus the two helpers a batch caller needs around it: a token
//! estimate for budgeting and a price table for accounting.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{estimate_tokens, pricing_for, ChatRequest, Message, OpenAIClient};
//!
//! let client = OpenAIClient::from_env()?;
//! let prompt = "Classify following article:\n\n...";
//! println!("~{} tokens", estimate_tokens(prompt));
//!
//! let response = client.chat_completion(
//!     ChatRequest::new("gpt-3.5-turbo")
//!         .message(Message::system("You always respond with JSON."))
//!         .message(Message::user(prompt)),
//! ).await?;
//!
//! if let Some(usage) = &response.usage {
//!     let (input, output) = pricing_for(&response.model).cost(usage);
//!     println!("cost ${:.5}", input + output);
//! }
//! ```

pub mod error;
pub mod pricing;
pub mod tokens;
pub mod types;

pub use error::{OpenAIError, Result};
pub use pricing::{pricing_for, ModelPricing};
pub use tokens::estimate_tokens;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get the first choice back.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Parse("No content in OpenAI response".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            prompt_tokens = raw.usage.map(|u| u.prompt_tokens),
            completion_tokens = raw.usage.map(|u| u.completion_tokens),
            "OpenAI chat completion"
        );

        let model = if raw.model.is_empty() {
            request.model
        } else {
            raw.model
        };

        Ok(ChatResponse {
            model,
            content,
            usage: raw.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        let client = OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:1");
        let result = tokio_test::block_on(
            client.chat_completion(ChatRequest::new("gpt-3.5-turbo").message(Message::user("hi"))),
        );

        assert!(matches!(result, Err(OpenAIError::Network(_))));
    }
}
