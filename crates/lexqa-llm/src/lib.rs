//! lexqa LLM Provider Layer
//!
//! Provider implementations of the capability traits from `lexqa-domain`.
//!
//! # Providers
//!
//! - `MistralProvider`: chat completions
//! - `CohereProvider`: chat completions, embeddings and reranking
//! - `Provider`: the configured provider, selected once from settings
//! - `MockProvider`, `MockEmbedder`, `MockReranker`: deterministic mocks for testing
//!
//! Every call is a single HTTP request. There is no retry layer: a failed
//! call surfaces as an [`LlmError`] and the caller decides what to abort.
//!
//! # Examples
//!
//! ```
//! use lexqa_llm::MockProvider;
//! use lexqa_domain::traits::{CompletionProvider, CompletionRequest};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = CompletionRequest::new("test prompt", 100, 0.0);
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let result = runtime.block_on(provider.complete(&request)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod cohere;
mod http;
pub mod mistral;
pub mod mock;
pub mod provider;

use lexqa_domain::traits::{CompletionProvider, CompletionRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use cohere::CohereProvider;
pub use mistral::MistralProvider;
pub use mock::{MockEmbedder, MockReranker};
pub use provider::{Capability, Provider, ProviderKind, ProviderSettings};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API key rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider lacks the requested capability
    #[error("Provider {provider} does not support {capability}")]
    Unsupported {
        /// Provider name
        provider: String,
        /// Capability name
        capability: String,
    },

    /// Missing or invalid provider settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Sentinel response that makes [`MockProvider`] fail
const MOCK_ERROR: &str = "ERROR";

/// Mock completion provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Lookup order per call: a response registered for the exact prompt, then the
/// next queued response, then the default response.
///
/// # Examples
///
/// ```
/// use lexqa_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.push_response("first queued");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model_name: String,
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    queue: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            model_name: "mock".to_string(),
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that answers successive calls in order
    ///
    /// Once the sequence is exhausted the default (empty) response is used.
    pub fn with_sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new("");
        for response in responses {
            provider.push_response(response);
        }
        provider
    }

    /// Override the reported model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), response.into());
    }

    /// Queue a response for the next unmatched call
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.queue).push_back(response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MOCK_ERROR.to_string());
    }

    /// Queue an error for the next unmatched call
    pub fn push_error(&self) {
        lock(&self.queue).push_back(MOCK_ERROR.to_string());
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.to_string());

        let response = lock(&self.responses)
            .get(prompt)
            .cloned()
            .or_else(|| lock(&self.queue).pop_front())
            .unwrap_or_else(|| self.default_response.clone());

        if response == MOCK_ERROR {
            return Err(LlmError::Other("Mock error".to_string()));
        }
        Ok(response)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.respond(&request.prompt)
    }
}

/// Lock a mock's shared state, recovering from a poisoned lock
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
