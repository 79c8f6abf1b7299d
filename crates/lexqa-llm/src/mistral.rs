//! Mistral Provider Implementation
//!
//! Chat completions against the Mistral La Plateforme API.
//!
//! # Examples
//!
//! ```no_run
//! use lexqa_llm::MistralProvider;
//!
//! let provider = MistralProvider::new("api-key", "mistral-large-latest").unwrap();
//! ```

use crate::http::{build_client, post_json};
use crate::LlmError;
use lexqa_domain::traits::{CompletionProvider, CompletionRequest};
use serde::{Deserialize, Serialize};

/// Default Mistral API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai";

/// Mistral API provider
pub struct MistralProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl MistralProvider {
    /// Create a new Mistral provider against the default endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Create a new Mistral provider against a custom endpoint
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: build_client()?,
        })
    }

    /// Generate text using the chat completions API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected
    /// - The model is not available
    /// - Network communication fails
    /// - The response carries no message content
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response: ChatResponse =
            post_json(&self.client, &url, &self.api_key, &self.model, &body).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }
}

impl CompletionProvider for MistralProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }
}
