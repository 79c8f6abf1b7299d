//! Provider selection
//!
//! The provider is chosen once from settings. Capability checks happen
//! when a pipeline is assembled, so a Mistral-backed retriever fails at
//! startup instead of on the first query.

use crate::cohere::CohereProvider;
use crate::mistral::MistralProvider;
use crate::LlmError;
use lexqa_domain::traits::{
    CompletionProvider, CompletionRequest, EmbedMode, EmbeddingProvider, RerankHit,
    RerankProvider,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported hosted providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Mistral AI
    Mistral,
    /// Cohere
    Cohere,
}

/// A single provider capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Chat completion
    Completion,
    /// Text embedding
    Embedding,
    /// Document reranking
    Rerank,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Completion => "completion",
            Capability::Embedding => "embedding",
            Capability::Rerank => "rerank",
        };
        f.write_str(name)
    }
}

impl ProviderKind {
    /// Lowercase provider name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mistral => "mistral",
            ProviderKind::Cohere => "cohere",
        }
    }

    /// Capabilities this provider offers
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            ProviderKind::Mistral => &[Capability::Completion],
            ProviderKind::Cohere => &[
                Capability::Completion,
                Capability::Embedding,
                Capability::Rerank,
            ],
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Mistral => "MISTRAL_API_KEY",
            ProviderKind::Cohere => "COHERE_API_KEY",
        }
    }

    /// Whether the provider offers `capability`
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mistral" => Ok(ProviderKind::Mistral),
            "cohere" => Ok(ProviderKind::Cohere),
            other => Err(LlmError::Config(format!("Unknown provider: {}", other))),
        }
    }
}

/// Everything needed to construct a [`Provider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Which provider to use
    pub kind: ProviderKind,
    /// Chat model name
    pub model: String,
    /// API key
    pub api_key: String,
    /// Endpoint override
    pub base_url: Option<String>,
    /// Embedding model override (Cohere only)
    pub embed_model: Option<String>,
    /// Rerank model override (Cohere only)
    pub rerank_model: Option<String>,
}

impl ProviderSettings {
    /// Settings with no overrides
    pub fn new(kind: ProviderKind, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            embed_model: None,
            rerank_model: None,
        }
    }
}

/// The configured provider
pub enum Provider {
    /// Mistral chat completions
    Mistral(MistralProvider),
    /// Cohere chat, embed and rerank
    Cohere(CohereProvider),
}

impl Provider {
    /// Build the provider described by `settings`
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key is empty or the HTTP
    /// client cannot be built.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, LlmError> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::Config(format!(
                "Missing API key for {} (set {})",
                settings.kind,
                settings.kind.api_key_env()
            )));
        }

        match settings.kind {
            ProviderKind::Mistral => {
                let provider = match &settings.base_url {
                    Some(url) => {
                        MistralProvider::with_endpoint(url, &settings.api_key, &settings.model)?
                    }
                    None => MistralProvider::new(&settings.api_key, &settings.model)?,
                };
                Ok(Provider::Mistral(provider))
            }
            ProviderKind::Cohere => {
                let mut provider = CohereProvider::new(&settings.api_key, &settings.model)?;
                if let Some(url) = &settings.base_url {
                    provider = provider.with_endpoint(url);
                }
                if let Some(model) = &settings.embed_model {
                    provider = provider.with_embed_model(model);
                }
                if let Some(model) = &settings.rerank_model {
                    provider = provider.with_rerank_model(model);
                }
                Ok(Provider::Cohere(provider))
            }
        }
    }

    /// Which provider this is
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Mistral(_) => ProviderKind::Mistral,
            Provider::Cohere(_) => ProviderKind::Cohere,
        }
    }

    /// Whether the provider offers `capability`
    pub fn supports(&self, capability: Capability) -> bool {
        self.kind().supports(capability)
    }

    /// Fail unless the provider offers `capability`
    pub fn require(&self, capability: Capability) -> Result<(), LlmError> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(unsupported(self.kind(), capability))
        }
    }
}

fn unsupported(kind: ProviderKind, capability: Capability) -> LlmError {
    LlmError::Unsupported {
        provider: kind.to_string(),
        capability: capability.to_string(),
    }
}

impl CompletionProvider for Provider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        match self {
            Provider::Mistral(p) => p.model_name(),
            Provider::Cohere(p) => CompletionProvider::model_name(p),
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        match self {
            Provider::Mistral(p) => p.chat(request).await,
            Provider::Cohere(p) => p.chat(request).await,
        }
    }
}

impl EmbeddingProvider for Provider {
    type Error = LlmError;

    fn max_batch_size(&self) -> usize {
        match self {
            Provider::Mistral(_) => 0,
            Provider::Cohere(p) => p.max_batch_size(),
        }
    }

    async fn embed(&self, texts: &[String], mode: EmbedMode) -> Result<Vec<Vec<f32>>, Self::Error> {
        match self {
            Provider::Mistral(_) => Err(unsupported(ProviderKind::Mistral, Capability::Embedding)),
            Provider::Cohere(p) => p.embed_batch(texts, mode).await,
        }
    }
}

impl RerankProvider for Provider {
    type Error = LlmError;

    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, Self::Error> {
        match self {
            Provider::Mistral(_) => Err(unsupported(ProviderKind::Mistral, Capability::Rerank)),
            Provider::Cohere(p) => p.rerank_documents(query, documents, top_n).await,
        }
    }
}
