//! Merge per-chunk results into one question set
//!
//! Neighbouring chunks overlap, so the same question usually comes back
//! from two responses. The first chunk to produce an id keeps it.

use lexqa_domain::{AnswerKey, QuestionRecord};
use std::collections::BTreeMap;
use tracing::warn;

/// Merged questions with their answers joined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Questions ascending by id
    pub questions: Vec<QuestionRecord>,

    /// Ids with no entry in the answer key, ascending
    pub missing_answers: Vec<u32>,
}

/// Fold chunk results in document order, then join the answer key
///
/// # Examples
///
/// ```
/// use lexqa_domain::AnswerKey;
/// use lexqa_extractor::aggregate;
/// use std::collections::BTreeMap;
///
/// let aggregation = aggregate(Vec::<BTreeMap<_, _>>::new(), &AnswerKey::new());
/// assert!(aggregation.questions.is_empty());
/// ```
pub fn aggregate<I>(chunk_results: I, answer_key: &AnswerKey) -> Aggregation
where
    I: IntoIterator<Item = BTreeMap<u32, QuestionRecord>>,
{
    let merged = chunk_results
        .into_iter()
        .fold(BTreeMap::new(), |mut merged, chunk| {
            for (id, record) in chunk {
                merged.entry(id).or_insert(record);
            }
            merged
        });

    let mut aggregation = Aggregation::default();
    for (id, mut record) in merged {
        record.correct_answer = answer_key.get(id);
        if record.correct_answer.is_none() {
            warn!("Question {} has no entry in the answer key", id);
            aggregation.missing_answers.push(id);
        }
        aggregation.questions.push(record);
    }
    aggregation
}
