//! Evaluation module - scored model answers

use crate::Choice;
use serde::{Deserialize, Serialize};

/// Outcome of replaying one question to an answering model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Question text as asked
    pub question: String,

    /// Ground-truth letter, if the dataset has one
    pub correct_answer: Option<Choice>,

    /// Letter extracted from the model response, if any
    pub predicted_answer: Option<Choice>,

    /// Retrieved context passages (RAG mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_used: Option<Vec<String>>,

    /// Raw model response
    pub llm_response: String,
}

impl EvaluationResult {
    /// Correct only when both letters are set and equal
    pub fn is_correct(&self) -> bool {
        matches!(
            (self.predicted_answer, self.correct_answer),
            (Some(predicted), Some(correct)) if predicted == correct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(correct: Option<Choice>, predicted: Option<Choice>) -> EvaluationResult {
        EvaluationResult {
            question: "q".to_string(),
            correct_answer: correct,
            predicted_answer: predicted,
            context_used: None,
            llm_response: String::new(),
        }
    }

    #[test]
    fn test_scoring() {
        assert!(result(Some(Choice::C), Some(Choice::C)).is_correct());
        assert!(!result(Some(Choice::C), Some(Choice::A)).is_correct());
        assert!(!result(Some(Choice::C), None).is_correct());
        assert!(!result(None, None).is_correct());
    }

    #[test]
    fn test_context_omitted_when_absent() {
        let json = serde_json::to_value(result(Some(Choice::A), None)).unwrap();
        assert!(json.get("context_used").is_none());
        assert!(json["predicted_answer"].is_null());
    }
}
