//! Multiple-choice evaluation of an answering model

use crate::config::EvalConfig;
use crate::error::EvalError;
use crate::prompt::evaluation_prompt;
use crate::report::EvaluationReport;
use crate::response::parse_predicted_answer;
use crate::retrieval::Retriever;
use lexqa_domain::traits::{
    CompletionProvider, CompletionRequest, EmbeddingProvider, RerankProvider,
};
use lexqa_domain::{EvaluationResult, QuestionRecord};
use tracing::{debug, info};

/// Replays questions to a model and scores its answers
pub struct Evaluator<L>
where
    L: CompletionProvider,
{
    llm_provider: L,
    config: EvalConfig,
}

impl<L> Evaluator<L>
where
    L: CompletionProvider,
{
    /// Create a new Evaluator
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Config`] if the configuration is invalid.
    pub fn new(llm_provider: L, config: EvalConfig) -> Result<Self, EvalError> {
        config.validate().map_err(EvalError::Config)?;
        Ok(Self {
            llm_provider,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Ask one question, optionally with retrieved context
    ///
    /// A response without a readable answer line is recorded with no
    /// prediction and counts as incorrect.
    pub async fn evaluate(
        &self,
        question: &QuestionRecord,
        context: Option<&[String]>,
    ) -> Result<EvaluationResult, EvalError> {
        let request = CompletionRequest::new(
            evaluation_prompt(question, context),
            self.config.max_tokens,
            self.config.temperature,
        );
        let response = self
            .llm_provider
            .complete(&request)
            .await
            .map_err(|e| EvalError::Llm(e.to_string()))?;

        let predicted_answer = parse_predicted_answer(&response);
        if predicted_answer.is_none() {
            debug!("No answer found in response to question {}", question.question_id);
        }

        Ok(EvaluationResult {
            question: question.question.clone(),
            correct_answer: question.correct_answer,
            predicted_answer,
            context_used: context.map(<[String]>::to_vec),
            llm_response: response,
        })
    }

    /// Evaluate every question without context
    ///
    /// # Errors
    ///
    /// Fails on the first provider error, or with
    /// [`EvalError::EmptyQuestionSet`] when `questions` is empty.
    pub async fn evaluate_all(
        &self,
        questions: &[QuestionRecord],
    ) -> Result<EvaluationReport, EvalError> {
        if questions.is_empty() {
            return Err(EvalError::EmptyQuestionSet);
        }

        let mut results = Vec::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            let result = self.evaluate(question, None).await?;
            log_progress(idx, questions.len(), question, &result);
            results.push(result);
        }
        EvaluationReport::from_results(results)
    }

    /// Evaluate every question with the top passages from `retriever`
    ///
    /// The retriever must already hold an indexed corpus. The question text
    /// is the retrieval query.
    pub async fn evaluate_all_with_retrieval<E, R>(
        &self,
        questions: &[QuestionRecord],
        retriever: &Retriever<E, R>,
    ) -> Result<EvaluationReport, EvalError>
    where
        E: EmbeddingProvider,
        R: RerankProvider,
    {
        if questions.is_empty() {
            return Err(EvalError::EmptyQuestionSet);
        }

        let mut results = Vec::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            let context = retriever
                .retrieve(&question.question, self.config.top_k)
                .await?;
            let result = self.evaluate(question, Some(context.as_slice())).await?;
            log_progress(idx, questions.len(), question, &result);
            results.push(result);
        }
        EvaluationReport::from_results(results)
    }
}

fn log_progress(idx: usize, total: usize, question: &QuestionRecord, result: &EvaluationResult) {
    let predicted = result
        .predicted_answer
        .map_or_else(|| "-".to_string(), |c| c.to_string());
    let expected = result
        .correct_answer
        .map_or_else(|| "-".to_string(), |c| c.to_string());
    info!(
        "Question {} ({}/{}): predicted {}, expected {}, {}",
        question.question_id,
        idx + 1,
        total,
        predicted,
        expected,
        if result.is_correct() { "correct" } else { "incorrect" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexqa_domain::Choice;
    use lexqa_llm::{MockEmbedder, MockProvider, MockReranker};
    use lexqa_store::ContextDocument;

    fn question(id: u32, answer: Choice) -> QuestionRecord {
        let options = Choice::ALL.iter().map(|c| (*c, format!("opción {}", c))).collect();
        let mut record = QuestionRecord::new(id, format!("¿Pregunta {}?", id), options);
        record.correct_answer = Some(answer);
        record
    }

    #[tokio::test]
    async fn test_evaluate_extracts_prediction() {
        let llm = MockProvider::new("Razonamiento: el artículo 1.\nRespuesta: c");
        let evaluator = Evaluator::new(llm, EvalConfig::default()).unwrap();

        let result = evaluator.evaluate(&question(1, Choice::C), None).await.unwrap();

        assert_eq!(result.predicted_answer, Some(Choice::C));
        assert!(result.is_correct());
        assert_eq!(result.context_used, None);
        assert_eq!(result.question, "¿Pregunta 1?");
    }

    #[tokio::test]
    async fn test_missing_answer_line_is_incorrect() {
        let llm = MockProvider::new("Razonamiento: no está claro.");
        let evaluator = Evaluator::new(llm, EvalConfig::default()).unwrap();

        let result = evaluator.evaluate(&question(1, Choice::A), None).await.unwrap();

        assert_eq!(result.predicted_answer, None);
        assert!(!result.is_correct());
    }

    #[tokio::test]
    async fn test_evaluate_all_accuracy() {
        let llm = MockProvider::with_sequence([
            "Respuesta: a",
            "Respuesta: b",
            "Respuesta: c",
            "sin respuesta",
        ]);
        let evaluator = Evaluator::new(llm, EvalConfig::default()).unwrap();
        let questions = vec![
            question(1, Choice::A),
            question(2, Choice::B),
            question(3, Choice::C),
            question(4, Choice::D),
        ];

        let report = evaluator.evaluate_all(&questions).await.unwrap();

        assert_eq!(report.correct_answers, 3);
        assert_eq!(format!("{:.2}", report.accuracy), "75.00");
    }

    #[tokio::test]
    async fn test_evaluate_all_empty() {
        let evaluator = Evaluator::new(MockProvider::default(), EvalConfig::default()).unwrap();
        let result = evaluator.evaluate_all(&[]).await;
        assert!(matches!(result, Err(EvalError::EmptyQuestionSet)));
    }

    #[tokio::test]
    async fn test_evaluate_with_retrieval_records_context() {
        let llm = MockProvider::new("Respuesta: a");
        let config = EvalConfig {
            top_k: 2,
            ..Default::default()
        };
        let evaluator = Evaluator::new(llm.clone(), config).unwrap();

        let corpus: Vec<ContextDocument> = (1..=4)
            .map(|i| ContextDocument::new(format!("Artículo {}.", i)))
            .collect();
        let mut retriever = Retriever::new(MockEmbedder::new(16), MockReranker::new(), 96).unwrap();
        retriever.index(&corpus).await.unwrap();

        let report = evaluator
            .evaluate_all_with_retrieval(&[question(1, Choice::A)], &retriever)
            .await
            .unwrap();

        let context = report.results[0].context_used.as_ref().unwrap();
        assert_eq!(context.len(), 2);
        assert!(llm.prompts()[0].contains(&format!("Contexto:\n{}\n{}", context[0], context[1])));
        assert_eq!(report.accuracy, 100.0);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts() {
        let llm = MockProvider::new("Respuesta: a");
        llm.push_error();
        let evaluator = Evaluator::new(llm, EvalConfig::default()).unwrap();

        let result = evaluator.evaluate_all(&[question(1, Choice::A)]).await;
        assert!(matches!(result, Err(EvalError::Llm(_))));
    }
}
