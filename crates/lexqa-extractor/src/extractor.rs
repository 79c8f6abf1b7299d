//! Core Extractor implementation

use crate::aggregate::aggregate;
use crate::chunking::{Chunk, TextChunker};
use crate::config::ExtractorConfig;
use crate::document::RawDocument;
use crate::error::ExtractorError;
use crate::parser::{parse_answer_key, parse_question_blocks};
use crate::prompt::PromptBuilder;
use crate::types::{ChunkExtraction, ExtractionMetadata, ExtractionResult};
use lexqa_domain::traits::{CompletionProvider, CompletionRequest};
use std::time::Instant;
use tracing::{debug, info};

/// The Extractor turns raw exam text into question records
///
/// Chunks are sent to the model one at a time, in document order. Any
/// provider error aborts the document.
pub struct Extractor<L>
where
    L: CompletionProvider,
{
    llm_provider: L,
    config: ExtractorConfig,
    chunker: TextChunker,
}

impl<L> Extractor<L>
where
    L: CompletionProvider,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let chunker = TextChunker::new(config.chunk_size, config.window_size);
        Ok(Self {
            llm_provider,
            config,
            chunker,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract questions from one chunk
    pub async fn extract_chunk(&self, chunk: &Chunk) -> Result<ChunkExtraction, ExtractorError> {
        let prompt = PromptBuilder::new(chunk.text.as_str()).build();
        debug!("Prompt length: {} chars", prompt.len());

        let request =
            CompletionRequest::new(prompt, self.config.max_tokens, self.config.temperature);
        let response = self
            .llm_provider
            .complete(&request)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        Ok(parse_question_blocks(&response))
    }

    /// Extract every question of a raw exam document
    ///
    /// The last non-blank line is read as the answer key, the rest is
    /// chunked and extracted, and the chunk results are merged with the key.
    pub async fn extract_document(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();

        let document = RawDocument::parse(text);
        let answer_key = parse_answer_key(&document.answer_key_line);
        info!("Answer key has {} entries", answer_key.len());

        let chunks = self.chunker.chunk(&document.body);
        info!("Split text into {} chunks", chunks.len());

        let mut chunk_questions = Vec::with_capacity(chunks.len());
        let mut failures = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let extraction = self.extract_chunk(chunk).await?;
            info!(
                "Chunk {}/{}: {} questions, {} dropped",
                idx + 1,
                chunks.len(),
                extraction.questions.len(),
                extraction.failures.len()
            );
            chunk_questions.push(extraction.questions);
            failures.extend(extraction.failures);
        }

        let aggregation = aggregate(chunk_questions, &answer_key);

        let metadata = ExtractionMetadata {
            chunks: chunks.len(),
            model_name: self.llm_provider.model_name().to_string(),
            missing_answers: aggregation.missing_answers,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} questions, {} failed blocks, {} without answer",
            aggregation.questions.len(),
            failures.len(),
            metadata.missing_answers.len()
        );

        Ok(ExtractionResult {
            questions: aggregation.questions,
            failures,
            metadata,
        })
    }
}
