//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the remote
//! LLM providers. Each provider implements the subset of capabilities it
//! supports; implementations live in `lexqa-llm`.

use std::future::Future;

/// A single text completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full prompt, sent as one user message
    pub prompt: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request with the given budget and temperature
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

/// Trait for text completion
///
/// Implemented by the infrastructure layer (lexqa-llm)
pub trait CompletionProvider {
    /// Error type for completion calls
    type Error: std::fmt::Display;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Whether texts are embedded as corpus documents or as search queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    /// Corpus side of a search
    Document,
    /// Query side of a search
    Query,
}

/// Trait for text embedding
///
/// Implemented by the infrastructure layer (lexqa-llm)
pub trait EmbeddingProvider {
    /// Error type for embedding calls
    type Error: std::fmt::Display;

    /// Largest number of texts accepted by a single call
    fn max_batch_size(&self) -> usize;

    /// Embed a batch of texts, one vector per input in input order
    fn embed(
        &self,
        texts: &[String],
        mode: EmbedMode,
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, Self::Error>> + Send;
}

/// One reranked candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankHit {
    /// Index into the candidate list that was submitted
    pub index: usize,

    /// Relevance score assigned by the reranker
    pub score: f32,
}

/// Trait for reranking candidate documents against a query
///
/// Implemented by the infrastructure layer (lexqa-llm)
pub trait RerankProvider {
    /// Error type for rerank calls
    type Error: std::fmt::Display;

    /// Reorder `documents` by relevance to `query`, returning at most `top_n` hits
    fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> impl Future<Output = Result<Vec<RerankHit>, Self::Error>> + Send;
}
