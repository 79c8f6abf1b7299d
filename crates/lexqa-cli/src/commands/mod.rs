//! Command implementations.

pub mod categorize;
pub mod config;
pub mod corpus;
pub mod evaluate;
pub mod extract;
pub mod merge;

pub use self::categorize::execute_categorize;
pub use self::config::execute_config;
pub use self::corpus::execute_corpus;
pub use self::evaluate::execute_evaluate;
pub use self::extract::execute_extract;
pub use self::merge::execute_merge;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use lexqa_llm::{Capability, Provider, ProviderKind, ProviderSettings};
use std::path::{Path, PathBuf};
use tracing::debug;

/// API keys taken from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `MISTRAL_API_KEY`
    pub mistral: Option<String>,
    /// `COHERE_API_KEY`
    pub cohere: Option<String>,
}

impl From<&Cli> for ApiKeys {
    fn from(cli: &Cli) -> Self {
        Self {
            mistral: cli.mistral_api_key.clone(),
            cohere: cli.cohere_api_key.clone(),
        }
    }
}

impl ApiKeys {
    /// Key for `kind`, empty when unset.
    pub fn get(&self, kind: ProviderKind) -> &str {
        let key = match kind {
            ProviderKind::Mistral => &self.mistral,
            ProviderKind::Cohere => &self.cohere,
        };
        key.as_deref().unwrap_or_default()
    }
}

/// Build the configured completion provider.
pub fn completion_provider(config: &Config, keys: &ApiKeys) -> Result<Provider> {
    let settings = config.completion_settings(keys.get(config.provider.kind));
    let provider = build(&settings, &[Capability::Completion])?;
    debug!("Completion provider: {} ({})", settings.kind, settings.model);
    Ok(provider)
}

/// Build the embedder and reranker used for retrieval.
///
/// Both are checked for their capability before any call is made.
pub fn retrieval_providers(config: &Config, keys: &ApiKeys) -> Result<(Provider, Provider)> {
    let settings = config.retrieval_settings(keys.get(config.retrieval.kind));
    let embedder = build(&settings, &[Capability::Embedding])?;
    let reranker = build(&settings, &[Capability::Rerank])?;
    debug!("Retrieval provider: {}", settings.kind);
    Ok((embedder, reranker))
}

fn build(settings: &ProviderSettings, required: &[Capability]) -> Result<Provider> {
    let provider = Provider::from_settings(settings)?;
    for capability in required {
        provider.require(*capability)?;
    }
    Ok(provider)
}

/// `file_name` in the directory of `input`.
pub fn sibling_path(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
