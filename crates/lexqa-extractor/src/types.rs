//! Result types for extraction

use lexqa_domain::QuestionRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// A question block that was dropped while parsing a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionFailure {
    /// Why the block was dropped
    pub reason: String,

    /// The block as the model returned it
    pub raw_text: String,
}

/// Parsed questions from one chunk's response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkExtraction {
    /// Accepted records keyed by id; a later block with the same id replaces
    /// an earlier one
    pub questions: BTreeMap<u32, QuestionRecord>,

    /// Dropped blocks
    pub failures: Vec<ExtractionFailure>,
}

/// Result of extracting a whole document
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Merged questions, ascending by id
    pub questions: Vec<QuestionRecord>,

    /// Dropped blocks across all chunks
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction run
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Chunks sent to the model
    pub chunks: usize,

    /// Model used for extraction
    pub model_name: String,

    /// Ids with no entry in the answer key
    pub missing_answers: Vec<u32>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
