//! In-memory embedding index
//!
//! Holds one vector per corpus document, in corpus order, for the lifetime
//! of a run. Search is exhaustive: the query is scored against every cached
//! vector with a plain dot product. Vectors are not normalized here, so
//! scores depend on the magnitudes the embedding provider returns.

use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Error, Debug, PartialEq)]
pub enum VectorIndexError {
    /// Vector length differs from the index dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },

    /// Zero-length vector
    #[error("Empty embedding vector")]
    EmptyVector,
}

/// Cached corpus embeddings
///
/// The dimension is fixed by the first vector added.
///
/// # Examples
///
/// ```
/// use lexqa_store::EmbeddingIndex;
///
/// let mut index = EmbeddingIndex::new();
/// index.add(vec![1.0, 0.0]).unwrap();
/// index.add(vec![0.0, 1.0]).unwrap();
///
/// let hits = index.search(&[0.9, 0.1], 1).unwrap();
/// assert_eq!(hits[0].0, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimension of the cached vectors, if any are cached
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.first().map(Vec::len)
    }

    fn check(&self, vector: &[f32]) -> Result<(), VectorIndexError> {
        if vector.is_empty() {
            return Err(VectorIndexError::EmptyVector);
        }
        match self.dimension() {
            Some(expected) if expected != vector.len() => Err(VectorIndexError::DimensionMismatch {
                expected,
                actual: vector.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Append a vector and return its position
    pub fn add(&mut self, vector: Vec<f32>) -> Result<usize, VectorIndexError> {
        self.check(&vector)?;
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Append a batch of vectors in order
    ///
    /// On error nothing from the batch is kept.
    pub fn extend(&mut self, vectors: Vec<Vec<f32>>) -> Result<(), VectorIndexError> {
        let before = self.vectors.len();
        for vector in vectors {
            if let Err(e) = self.add(vector) {
                self.vectors.truncate(before);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Score `query` against every vector and return the best `k`
    ///
    /// Results are `(position, score)` by descending score; equal scores
    /// keep corpus order. An empty index yields no results.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>, VectorIndexError> {
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }
        self.check(query)?;

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, dot_product(query, v)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        Ok(scored)
    }

    /// Number of cached vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Dot product of two equal-length vectors
///
/// Extra components of the longer vector are ignored; callers check
/// dimensions first.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_fixed_by_first_vector() {
        let mut index = EmbeddingIndex::new();
        assert_eq!(index.dimension(), None);

        index.add(vec![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(index.dimension(), Some(3));

        let err = index.add(vec![0.1, 0.2]).unwrap_err();
        assert_eq!(
            err,
            VectorIndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut index = EmbeddingIndex::new();
        index.add(vec![1.0, 0.0]).unwrap();

        let result = index.extend(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(result.is_err());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_search_ranks_by_dot_product() {
        let mut index = EmbeddingIndex::new();
        index
            .extend(vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.7, 0.7]])
            .unwrap();

        let hits = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits, vec![(1, 1.0), (2, 0.7)]);
    }

    #[test]
    fn test_search_scores_are_not_normalized() {
        let mut index = EmbeddingIndex::new();
        index.extend(vec![vec![1.0, 0.0], vec![3.0, 3.0]]).unwrap();

        // The aligned unit vector loses to a longer one at 45 degrees.
        let hits = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits, vec![(1, 3.0), (0, 1.0)]);
    }

    #[test]
    fn test_search_ties_keep_corpus_order() {
        let mut index = EmbeddingIndex::new();
        index
            .extend(vec![vec![0.5, 0.5], vec![0.0, 0.0], vec![0.5, 0.5]])
            .unwrap();

        let hits = index.search(&[1.0, 1.0], 3).unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.0).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_search_query_dimension_mismatch() {
        let mut index = EmbeddingIndex::new();
        index.add(vec![1.0, 0.0]).unwrap();
        assert!(index.search(&[1.0, 0.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_empty_index_search() {
        let index = EmbeddingIndex::new();
        assert!(index.search(&[1.0], 5).unwrap().is_empty());
    }
}
