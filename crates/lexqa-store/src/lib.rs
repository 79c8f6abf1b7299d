//! lexqa Storage Layer
//!
//! File-backed persistence for the question pipeline.
//!
//! # Architecture
//!
//! - `dataset`: question sets as pretty-printed JSON arrays
//! - `merge`: gather `categorized_questions.json` files from a dataset tree
//!   and filter them by category
//! - `corpus`: context documents for retrieval, and builders that split a
//!   statute or a markdown code into documents
//! - `vector_index`: in-memory cache of corpus embeddings with dot-product
//!   search
//!
//! # Examples
//!
//! ```no_run
//! use lexqa_store::{load_questions, save_questions};
//!
//! let questions = load_questions("data/exam/questions.json").unwrap();
//! save_questions("data/exam/copy.json", &questions).unwrap();
//! ```

#![warn(missing_docs)]

pub mod corpus;
pub mod dataset;
pub mod merge;
pub mod vector_index;

use std::path::PathBuf;
use thiserror::Error;

pub use corpus::{load_corpus, save_corpus, split_articles, split_markdown_sections, ContextDocument};
pub use dataset::{load_questions, save_questions};
pub use merge::{merge_and_filter, MergeResult, DATASET_FILE_NAME};
pub use vector_index::{dot_product, EmbeddingIndex, VectorIndexError};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A file did not hold the expected JSON
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Embedding index error
    #[error(transparent)]
    Index(#[from] VectorIndexError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Serialize `value` as 2-space indented JSON and write it, creating parent
/// directories as needed
pub(crate) fn write_json_pretty<T: serde::Serialize + ?Sized>(
    path: &std::path::Path,
    value: &T,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    let mut json = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

/// Read a file and decode it as JSON
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))
}
