//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider error
    #[error(transparent)]
    Llm(#[from] lexqa_llm::LlmError),

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] lexqa_extractor::ExtractorError),

    /// Dataset or corpus storage error
    #[error(transparent)]
    Store(#[from] lexqa_store::StoreError),

    /// Categorization or evaluation error
    #[error(transparent)]
    Eval(#[from] lexqa_eval::EvalError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
