//! OpenAI-compatible chat completions provider
//!
//! Speaks the `/v1/chat/completions` wire format, which several hosted and
//! self-hosted gateways implement. One attempt per request; the caller
//! decides what a failure means.

use crate::{GenerationError, GenerationProvider, GenerationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default API base
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Chat-completions generation provider.
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a provider. `api_key` of `None` means the deployment has no
    /// credential; every call will fail with `MissingCredential`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Provider against the default API base and model
    pub fn with_defaults(api_key: Option<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL, api_key)
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.prompt.clone(),
        });

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse("response had no choices".to_string()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_without_key_reports_unconfigured() {
        let provider = OpenAiProvider::with_defaults(None);
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_provider_without_key_fails_before_any_network_call() {
        let provider = OpenAiProvider::with_defaults(None);
        let result = provider.generate(&GenerationRequest::new("p", 100)).await;
        assert!(matches!(result, Err(GenerationError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_http_error() {
        let provider = OpenAiProvider::new(
            "http://127.0.0.1:9", // discard port, nothing listens here
            DEFAULT_MODEL,
            Some("test-key".to_string()),
        );
        let result = provider.generate(&GenerationRequest::new("p", 100)).await;
        assert!(matches!(result, Err(GenerationError::Http(_))));
    }
}
