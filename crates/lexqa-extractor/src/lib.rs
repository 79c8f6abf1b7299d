//! lexqa Extractor
//!
//! Turns raw exam text into structured question records using an LLM.
//!
//! # Overview
//!
//! An exam file is a block of questions followed by a single answer key
//! line. The body is cut into overlapping chunks, each chunk is sent to the
//! model with a formatting instruction, and the free-text responses are
//! parsed back into records. Results from all chunks are merged and the
//! answer key is joined in.
//!
//! # Architecture
//!
//! ```text
//! Text → RawDocument → TextChunker → LLM → parse_question_blocks → aggregate
//!                   └→ parse_answer_key ─────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use lexqa_extractor::{Extractor, ExtractorConfig};
//! use lexqa_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("1\n¿Pregunta?\na) x\nb) y\nc) z\nd) w");
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let result = extractor.extract_document("1\n¿Pregunta?\n...\n1 a").await?;
//!
//! println!("Extracted: {} questions", result.questions.len());
//! println!("Failures: {} blocks", result.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod chunking;
mod config;
mod document;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use aggregate::{aggregate, Aggregation};
pub use chunking::{Chunk, TextChunker};
pub use config::ExtractorConfig;
pub use document::RawDocument;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::{parse_answer_key, parse_question_blocks};
pub use prompt::PromptBuilder;
pub use types::{ChunkExtraction, ExtractionFailure, ExtractionMetadata, ExtractionResult};
