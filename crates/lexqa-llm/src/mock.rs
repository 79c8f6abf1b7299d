//! Deterministic embedding and rerank mocks
//!
//! The embedder hashes each text into a unit vector, so identical texts
//! always map to identical vectors and the dot product of a text with
//! itself is 1.0. The reranker either keeps input order or ranks by
//! configured per-document scores.

use crate::{lock, LlmError};
use lexqa_domain::traits::{EmbedMode, EmbeddingProvider, RerankHit, RerankProvider};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

/// Hash-based embedding mock
#[derive(Clone)]
pub struct MockEmbedder {
    dimension: usize,
    max_batch_size: usize,
    batches: Arc<Mutex<Vec<(usize, EmbedMode)>>>,
}

impl MockEmbedder {
    /// Create an embedder producing vectors of `dimension` components
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            max_batch_size: 96,
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the advertised batch limit
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Sizes and modes of every batch received so far
    pub fn batches(&self) -> Vec<(usize, EmbedMode)> {
        lock(&self.batches).clone()
    }

    /// Number of embed calls made
    pub fn call_count(&self) -> usize {
        lock(&self.batches).len()
    }

    /// Embed a single text
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector: Vec<f32> = (0..self.dimension)
            .map(|i| hash_with_seed(text, i as u64))
            .collect();

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }
        vector
    }
}

fn hash_with_seed(text: &str, seed: u64) -> f32 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    seed.hash(&mut hasher);
    let normalized = (hasher.finish() as f64 / u64::MAX as f64) * 2.0 - 1.0;
    normalized as f32
}

impl EmbeddingProvider for MockEmbedder {
    type Error = LlmError;

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    async fn embed(&self, texts: &[String], mode: EmbedMode) -> Result<Vec<Vec<f32>>, Self::Error> {
        if texts.len() > self.max_batch_size {
            return Err(LlmError::Other(format!(
                "Embed batch of {} exceeds limit of {}",
                texts.len(),
                self.max_batch_size
            )));
        }
        lock(&self.batches).push((texts.len(), mode));
        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }
}

/// Rerank mock
///
/// Without configured scores every document scores 0.0 and the stable sort
/// keeps input order.
#[derive(Clone, Default)]
pub struct MockReranker {
    scores: HashMap<String, f32>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockReranker {
    /// Create a reranker that keeps input order
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a relevance score to a document text
    pub fn with_score(mut self, document: impl Into<String>, score: f32) -> Self {
        self.scores.insert(document.into(), score);
        self
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

impl RerankProvider for MockReranker {
    type Error = LlmError;

    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, Self::Error> {
        lock(&self.queries).push(query.to_string());

        let mut hits: Vec<RerankHit> = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| RerankHit {
                index,
                score: self.scores.get(doc).copied().unwrap_or(0.0),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_n);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn test_embedder_is_deterministic_and_normalized() {
        let embedder = MockEmbedder::new(32);
        let texts = vec!["Artículo 14".to_string(), "Artículo 15".to_string()];

        let first = embedder.embed(&texts, EmbedMode::Document).await.unwrap();
        let second = embedder.embed(&texts, EmbedMode::Query).await.unwrap();

        assert_eq!(first, second);
        assert!((dot(&first[0], &first[0]) - 1.0).abs() < 1e-5);
        assert_ne!(first[0], first[1]);
        assert_eq!(
            embedder.batches(),
            vec![(2, EmbedMode::Document), (2, EmbedMode::Query)]
        );
    }

    #[tokio::test]
    async fn test_embedder_enforces_batch_limit() {
        let embedder = MockEmbedder::new(4).with_max_batch_size(2);
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        assert!(embedder.embed(&texts, EmbedMode::Document).await.is_err());
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reranker_orders_by_score() {
        let reranker = MockReranker::new().with_score("b", 0.9).with_score("c", 0.5);
        let docs = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let hits = reranker.rerank("q", &docs, 2).await.unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(reranker.queries(), vec!["q".to_string()]);
    }

    #[tokio::test]
    async fn test_reranker_default_keeps_order() {
        let reranker = MockReranker::new();
        let docs = vec!["x".to_string(), "y".to_string(), "z".to_string()];

        let hits = reranker.rerank("q", &docs, 3).await.unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
