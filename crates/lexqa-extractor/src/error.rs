//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Malformed question blocks are not errors; they are reported as
/// [`ExtractionFailure`](crate::ExtractionFailure)s next to the results.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error, fatal for the run
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
