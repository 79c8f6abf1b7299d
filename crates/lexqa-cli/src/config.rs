//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lexqa_eval::{CategorizerConfig, EvalConfig};
use lexqa_extractor::ExtractorConfig;
use lexqa_llm::{ProviderKind, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Embedding and rerank provider
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Question extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Categorization
    #[serde(default)]
    pub categorizer: CategorizerConfig,

    /// Evaluation
    #[serde(default)]
    pub evaluation: EvalConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Completion provider section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name
    #[serde(default = "default_completion_kind")]
    pub kind: ProviderKind,

    /// Chat model
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Retrieval provider section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Provider name; must offer embedding and rerank
    #[serde(default = "default_retrieval_kind")]
    pub kind: ProviderKind,

    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Embedding model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_model: Option<String>,

    /// Rerank model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_model: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lexqa").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is
    /// read if present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.evaluation
            .validate()
            .map_err(|e| CliError::Config(format!("[evaluation] {}", e)))?;
        if self.categorizer.max_tokens == 0 {
            return Err(CliError::Config(
                "[categorizer] max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `--provider` and `--model`.
    ///
    /// Switching provider without naming a model selects that provider's
    /// default model.
    pub fn override_provider(&mut self, kind: Option<ProviderKind>, model: Option<String>) {
        if let Some(kind) = kind {
            if kind != self.provider.kind {
                self.provider.kind = kind;
                self.provider.model = default_model(kind).to_string();
                self.provider.base_url = None;
            }
        }
        if let Some(model) = model {
            self.provider.model = model;
        }
    }

    /// Settings for the completion provider.
    pub fn completion_settings(&self, api_key: &str) -> ProviderSettings {
        let mut settings = ProviderSettings::new(self.provider.kind, &self.provider.model, api_key);
        settings.base_url = self.provider.base_url.clone();
        settings
    }

    /// Settings for the retrieval provider.
    pub fn retrieval_settings(&self, api_key: &str) -> ProviderSettings {
        let kind = self.retrieval.kind;
        let mut settings = ProviderSettings::new(kind, default_model(kind), api_key);
        settings.base_url = self.retrieval.base_url.clone();
        settings.embed_model = self.retrieval.embed_model.clone();
        settings.rerank_model = self.retrieval.rerank_model.clone();
        settings
    }
}

/// Default chat model for a provider.
pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Mistral => "mistral-large-latest",
        ProviderKind::Cohere => "command-r-08-2024",
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_completion_kind(),
            model: default_completion_model(),
            base_url: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            kind: default_retrieval_kind(),
            base_url: None,
            embed_model: None,
            rerank_model: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_completion_kind() -> ProviderKind {
    ProviderKind::Mistral
}

fn default_completion_model() -> String {
    default_model(ProviderKind::Mistral).to_string()
}

fn default_retrieval_kind() -> ProviderKind {
    ProviderKind::Cohere
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.kind, ProviderKind::Mistral);
        assert_eq!(config.provider.model, "mistral-large-latest");
        assert_eq!(config.retrieval.kind, ProviderKind::Cohere);
        assert_eq!(config.extractor.chunk_size, 3000);
        assert_eq!(config.evaluation.top_k, 3);
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            kind = "cohere"

            [extractor]
            chunk_size = 1500

            [settings]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Cohere);
        assert_eq!(config.provider.model, "mistral-large-latest");
        assert_eq!(config.extractor.chunk_size, 1500);
        assert_eq!(config.extractor.window_size, 200);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.evaluation.top_k = 5;
        config.retrieval.rerank_model = Some("rerank-v3.5".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.evaluation.top_k, 5);
        assert_eq!(loaded.retrieval.rerank_model.as_deref(), Some("rerank-v3.5"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[evaluation]\ntop_k = 0\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_override_provider() {
        let mut config = Config::default();
        config.override_provider(Some(ProviderKind::Cohere), None);
        assert_eq!(config.provider.kind, ProviderKind::Cohere);
        assert_eq!(config.provider.model, "command-r-08-2024");

        config.override_provider(None, Some("command-r-plus".to_string()));
        assert_eq!(config.provider.model, "command-r-plus");

        // same kind keeps the configured model
        config.override_provider(Some(ProviderKind::Cohere), None);
        assert_eq!(config.provider.model, "command-r-plus");
    }

    #[test]
    fn test_retrieval_settings() {
        let mut config = Config::default();
        config.retrieval.embed_model = Some("embed-v4.0".to_string());

        let settings = config.retrieval_settings("key");
        assert_eq!(settings.kind, ProviderKind::Cohere);
        assert_eq!(settings.embed_model.as_deref(), Some("embed-v4.0"));
        assert_eq!(settings.api_key, "key");
    }
}
