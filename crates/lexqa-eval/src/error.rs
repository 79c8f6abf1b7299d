//! Error types for categorization, evaluation and retrieval

use lexqa_store::VectorIndexError;
use thiserror::Error;

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvalError {
    /// Completion provider error, fatal for the run
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding provider error
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Rerank provider error
    #[error("Rerank error: {0}")]
    Rerank(String),

    /// Query and corpus vectors disagree
    #[error(transparent)]
    Index(#[from] VectorIndexError),

    /// Retrieval attempted before the corpus was indexed
    #[error("Corpus has not been indexed")]
    NotIndexed,

    /// Accuracy requested over zero questions
    #[error("Cannot compute accuracy over an empty question set")]
    EmptyQuestionSet,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
