//! Answer key module - ground truth letters for a document

use crate::Choice;
use std::collections::BTreeMap;

/// Mapping from question id to correct letter
///
/// Built once per document from its trailing answer line and read-only
/// afterwards. Later inserts for the same id replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    answers: BTreeMap<u32, Choice>,
}

impl AnswerKey {
    /// Create an empty key
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for a question id
    pub fn insert(&mut self, question_id: u32, choice: Choice) {
        self.answers.insert(question_id, choice);
    }

    /// Look up the answer for a question id
    pub fn get(&self, question_id: u32) -> Option<Choice> {
        self.answers.get(&question_id).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// True when no entries were parsed
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Choice)> + '_ {
        self.answers.iter().map(|(id, choice)| (*id, *choice))
    }
}

impl FromIterator<(u32, Choice)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (u32, Choice)>>(iter: I) -> Self {
        let mut key = AnswerKey::new();
        for (id, choice) in iter {
            key.insert(id, choice);
        }
        key
    }
}
