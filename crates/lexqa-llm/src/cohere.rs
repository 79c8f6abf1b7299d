//! Cohere Provider Implementation
//!
//! Chat, embed and rerank against the Cohere v2 API. This is the only
//! hosted provider that carries all three capabilities, so it backs the
//! retrieval-augmented evaluation.

use crate::http::{build_client, post_json};
use crate::LlmError;
use lexqa_domain::traits::{
    CompletionProvider, CompletionRequest, EmbedMode, EmbeddingProvider, RerankHit,
    RerankProvider,
};
use serde::{Deserialize, Serialize};

/// Default Cohere API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.cohere.com";

/// Largest number of texts the embed endpoint accepts per call
pub const EMBED_BATCH_LIMIT: usize = 96;

/// Default embedding model
pub const DEFAULT_EMBED_MODEL: &str = "embed-multilingual-v3.0";

/// Default rerank model
pub const DEFAULT_RERANK_MODEL: &str = "rerank-multilingual-v3.0";

/// Cohere API provider
pub struct CohereProvider {
    endpoint: String,
    api_key: String,
    model: String,
    embed_model: String,
    rerank_model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: &'a str,
    embedding_types: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: EmbeddingsByType,
}

#[derive(Deserialize)]
struct EmbeddingsByType {
    #[serde(default)]
    float: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f32,
}

impl CohereProvider {
    /// Create a new Cohere provider with the default embed and rerank models
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            rerank_model: DEFAULT_RERANK_MODEL.to_string(),
            client: build_client()?,
        })
    }

    /// Point the provider at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the embedding model
    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = model.into();
        self
    }

    /// Set the rerank model
    pub fn with_rerank_model(mut self, model: impl Into<String>) -> Self {
        self.rerank_model = model.into();
        self
    }

    /// Generate text using the v2 chat API
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v2/chat", self.endpoint);
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
            .message
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no text content".to_string()))
    }

    /// Embed up to [`EMBED_BATCH_LIMIT`] texts with the v2 embed API
    pub async fn embed_batch(
        &self,
        texts: &[String],
        mode: EmbedMode,
    ) -> Result<Vec<Vec<f32>>, LlmError> {
        if texts.len() > EMBED_BATCH_LIMIT {
            return Err(LlmError::Other(format!(
                "Embed batch of {} exceeds limit of {}",
                texts.len(),
                EMBED_BATCH_LIMIT
            )));
        }

        let url = format!("{}/v2/embed", self.endpoint);
        let body = EmbedRequest {
            model: &self.embed_model,
            texts,
            input_type: input_type(mode),
            embedding_types: ["float"],
        };

        let response: EmbedResponse =
            post_json(&self.client, &url, &self.api_key, &self.embed_model, &body).await?;

        let vectors = response.embeddings.float;
        if vectors.len() != texts.len() {
            return Err(LlmError::InvalidResponse(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }

    /// Rerank documents with the v2 rerank API
    pub async fn rerank_documents(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, LlmError> {
        let url = format!("{}/v2/rerank", self.endpoint);
        let body = RerankRequest {
            model: &self.rerank_model,
            query,
            documents,
            top_n,
        };

        let response: RerankResponse =
            post_json(&self.client, &url, &self.api_key, &self.rerank_model, &body).await?;

        response
            .results
            .into_iter()
            .map(|result| {
                if result.index >= documents.len() {
                    return Err(LlmError::InvalidResponse(format!(
                        "Rerank index {} out of range for {} documents",
                        result.index,
                        documents.len()
                    )));
                }
                Ok(RerankHit {
                    index: result.index,
                    score: result.relevance_score,
                })
            })
            .collect()
    }
}

fn input_type(mode: EmbedMode) -> &'static str {
    match mode {
        EmbedMode::Document => "search_document",
        EmbedMode::Query => "search_query",
    }
}

impl CompletionProvider for CohereProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }
}

impl EmbeddingProvider for CohereProvider {
    type Error = LlmError;

    fn max_batch_size(&self) -> usize {
        EMBED_BATCH_LIMIT
    }

    async fn embed(&self, texts: &[String], mode: EmbedMode) -> Result<Vec<Vec<f32>>, Self::Error> {
        self.embed_batch(texts, mode).await
    }
}

impl RerankProvider for CohereProvider {
    type Error = LlmError;

    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, Self::Error> {
        self.rerank_documents(query, documents, top_n).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohere_provider_defaults() {
        let provider = CohereProvider::new("key", "command-r-08-2024").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.embed_model, DEFAULT_EMBED_MODEL);
        assert_eq!(provider.rerank_model, DEFAULT_RERANK_MODEL);
        assert_eq!(provider.max_batch_size(), 96);
    }

    #[test]
    fn test_builder_overrides() {
        let provider = CohereProvider::new("key", "command-r")
            .unwrap()
            .with_endpoint("http://localhost:8000/")
            .with_embed_model("embed-english-v3.0")
            .with_rerank_model("rerank-v3.5");
        assert_eq!(provider.endpoint, "http://localhost:8000");
        assert_eq!(provider.embed_model, "embed-english-v3.0");
        assert_eq!(provider.rerank_model, "rerank-v3.5");
    }

    #[test]
    fn test_embed_request_shape() {
        let texts = vec!["Artículo 1.".to_string()];
        let body = EmbedRequest {
            model: DEFAULT_EMBED_MODEL,
            texts: &texts,
            input_type: input_type(EmbedMode::Query),
            embedding_types: ["float"],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input_type"], "search_query");
        assert_eq!(json["embedding_types"][0], "float");
        assert_eq!(json["texts"][0], "Artículo 1.");
    }

    #[test]
    fn test_response_parsing() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"id":"x","message":{"role":"assistant","content":[{"type":"text","text":"Respuesta: a"}]}}"#,
        )
        .unwrap();
        assert_eq!(chat.message.content[0].text.as_deref(), Some("Respuesta: a"));

        let embed: EmbedResponse =
            serde_json::from_str(r#"{"embeddings":{"float":[[0.1,0.2],[0.3,0.4]]}}"#).unwrap();
        assert_eq!(embed.embeddings.float.len(), 2);

        let rerank: RerankResponse = serde_json::from_str(
            r#"{"results":[{"index":2,"relevance_score":0.9},{"index":0,"relevance_score":0.1}]}"#,
        )
        .unwrap();
        assert_eq!(rerank.results[0].index, 2);
    }

    #[tokio::test]
    async fn test_oversized_batch_is_rejected() {
        let provider = CohereProvider::new("key", "m").unwrap().with_endpoint("http://localhost:1");
        let texts = vec!["t".to_string(); EMBED_BATCH_LIMIT + 1];

        let result = provider.embed(&texts, EmbedMode::Document).await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }
}
