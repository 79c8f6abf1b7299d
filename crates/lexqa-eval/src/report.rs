//! Accuracy report over a set of evaluation results

use crate::error::EvalError;
use lexqa_domain::EvaluationResult;
use serde::{Deserialize, Serialize};

/// Summary and per-question detail of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Percentage of correct answers, 0 to 100
    pub accuracy: f64,

    /// Questions evaluated
    pub total_questions: usize,

    /// Questions answered correctly
    pub correct_answers: usize,

    /// Per-question results, in evaluation order
    pub results: Vec<EvaluationResult>,
}

impl EvaluationReport {
    /// Score a result set
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::EmptyQuestionSet`] for an empty set instead of
    /// reporting a meaningless accuracy.
    pub fn from_results(results: Vec<EvaluationResult>) -> Result<Self, EvalError> {
        if results.is_empty() {
            return Err(EvalError::EmptyQuestionSet);
        }

        let total_questions = results.len();
        let correct_answers = results.iter().filter(|r| r.is_correct()).count();
        let accuracy = correct_answers as f64 / total_questions as f64 * 100.0;

        Ok(Self {
            accuracy,
            total_questions,
            correct_answers,
            results,
        })
    }

    /// Results whose prediction was wrong or missing
    pub fn incorrect(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter(|r| !r.is_correct())
    }
}
