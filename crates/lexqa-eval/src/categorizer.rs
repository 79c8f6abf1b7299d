//! Question categorization by legal subdomain

use crate::config::CategorizerConfig;
use crate::error::EvalError;
use crate::prompt::categorization_prompt;
use lexqa_domain::traits::{CompletionProvider, CompletionRequest};
use lexqa_domain::{Category, QuestionRecord};
use tracing::{debug, info};

/// Counts from a [`Categorizer::categorize_all`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorizeSummary {
    /// Questions sent to the classifier
    pub categorized: usize,
    /// Questions that already had a category
    pub skipped: usize,
}

/// Assigns each question a [`Category`] with one completion call
pub struct Categorizer<L>
where
    L: CompletionProvider,
{
    llm_provider: L,
    config: CategorizerConfig,
}

impl<L> Categorizer<L>
where
    L: CompletionProvider,
{
    /// Create a new Categorizer
    pub fn new(llm_provider: L, config: CategorizerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Classify one question text
    ///
    /// Responses that do not name a taxonomy label exactly map to
    /// [`Category::Otros`]; only provider failures are errors.
    pub async fn categorize(&self, question: &str) -> Result<Category, EvalError> {
        let request = CompletionRequest::new(
            categorization_prompt(question),
            self.config.max_tokens,
            self.config.temperature,
        );
        let response = self
            .llm_provider
            .complete(&request)
            .await
            .map_err(|e| EvalError::Llm(e.to_string()))?;

        let category = Category::from_response(&response);
        if category == Category::Otros {
            debug!("Classifier response {:?} mapped to otros", response.trim());
        }
        Ok(category)
    }

    /// Categorize every question that has no category yet
    ///
    /// Records that already carry a category are left untouched and not
    /// sent, so an interrupted run can be resumed on its own output.
    pub async fn categorize_all(
        &self,
        questions: &mut [QuestionRecord],
    ) -> Result<CategorizeSummary, EvalError> {
        let total = questions.len();
        let mut summary = CategorizeSummary::default();

        for (idx, question) in questions.iter_mut().enumerate() {
            if question.is_categorized() {
                summary.skipped += 1;
                continue;
            }
            let category = self.categorize(&question.question).await?;
            info!(
                "Question {} ({}/{}): {}",
                question.question_id,
                idx + 1,
                total,
                category.as_str()
            );
            question.category = Some(category);
            summary.categorized += 1;
        }

        Ok(summary)
    }
}
