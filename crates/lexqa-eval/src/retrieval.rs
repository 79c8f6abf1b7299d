//! Retrieval of context passages for RAG evaluation
//!
//! The corpus is embedded once, in batches, and its vectors are cached for
//! the run. Each query is embedded, scored against every cached vector by
//! dot product, and the best `k` candidates are reordered by the rerank
//! service.

use crate::error::EvalError;
use lexqa_domain::traits::{EmbedMode, EmbeddingProvider, RerankProvider};
use lexqa_store::{ContextDocument, EmbeddingIndex};
use tracing::{debug, info};

/// Embedding search followed by external reranking
pub struct Retriever<E, R>
where
    E: EmbeddingProvider,
    R: RerankProvider,
{
    embedder: E,
    reranker: R,
    batch_size: usize,
    documents: Vec<String>,
    index: EmbeddingIndex,
    indexed: bool,
}

impl<E, R> Retriever<E, R>
where
    E: EmbeddingProvider,
    R: RerankProvider,
{
    /// Create a retriever
    ///
    /// `batch_size` is capped by the embedder's own limit.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Config`] if the effective batch size is zero.
    pub fn new(embedder: E, reranker: R, batch_size: usize) -> Result<Self, EvalError> {
        let batch_size = batch_size.min(embedder.max_batch_size());
        if batch_size == 0 {
            return Err(EvalError::Config(
                "embedding batch size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            embedder,
            reranker,
            batch_size,
            documents: Vec::new(),
            index: EmbeddingIndex::new(),
            indexed: false,
        })
    }

    /// Texts per embedding call
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of indexed passages
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no passages are indexed
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embed the corpus and cache its vectors, replacing any earlier index
    pub async fn index(&mut self, corpus: &[ContextDocument]) -> Result<usize, EvalError> {
        let documents: Vec<String> = corpus.iter().map(|doc| doc.text().to_string()).collect();
        let mut index = EmbeddingIndex::new();

        for (batch_idx, batch) in documents.chunks(self.batch_size).enumerate() {
            let vectors = self
                .embedder
                .embed(batch, EmbedMode::Document)
                .await
                .map_err(|e| EvalError::Embedding(e.to_string()))?;
            if vectors.len() != batch.len() {
                return Err(EvalError::Embedding(format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }
            index.extend(vectors)?;
            debug!("Embedded batch {} ({} passages)", batch_idx + 1, batch.len());
        }

        info!("Indexed {} context passages", documents.len());
        self.documents = documents;
        self.index = index;
        self.indexed = true;
        Ok(self.documents.len())
    }

    /// Return up to `k` passages for `query`, in reranked order
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NotIndexed`] before [`index`](Self::index) has
    /// run, and [`EvalError::Index`] if the query vector's dimension differs
    /// from the corpus vectors.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, EvalError> {
        if !self.indexed {
            return Err(EvalError::NotIndexed);
        }
        if self.documents.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedder
            .embed(&[query.to_string()], EmbedMode::Query)
            .await
            .map_err(|e| EvalError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::Embedding("no vector returned for query".to_string()))?;

        let candidates: Vec<usize> = self
            .index
            .search(&query_vector, k)?
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        let candidate_texts: Vec<String> = candidates
            .iter()
            .map(|&position| self.documents[position].clone())
            .collect();

        let hits = self
            .reranker
            .rerank(query, &candidate_texts, k)
            .await
            .map_err(|e| EvalError::Rerank(e.to_string()))?;

        hits.into_iter()
            .map(|hit| {
                candidate_texts.get(hit.index).cloned().ok_or_else(|| {
                    EvalError::Rerank(format!("rerank index {} out of range", hit.index))
                })
            })
            .collect()
    }
}
