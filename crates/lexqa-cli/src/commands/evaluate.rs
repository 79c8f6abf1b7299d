//! Evaluate command implementation.

use super::{completion_provider, retrieval_providers, ApiKeys};
use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexqa_domain::traits::{CompletionProvider, EmbeddingProvider, RerankProvider};
use lexqa_domain::QuestionRecord;
use lexqa_eval::{EvalError, EvaluationReport, Evaluator, Retriever};
use lexqa_store::{load_corpus, load_questions};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Execute the evaluate command.
///
/// Every provider is built and checked before the first question is sent.
pub async fn execute_evaluate(
    args: EvaluateArgs,
    config: &Config,
    keys: &ApiKeys,
    formatter: &Formatter,
) -> Result<()> {
    let mut eval_config = config.evaluation.clone();
    if let Some(top_k) = args.top_k {
        eval_config.top_k = top_k;
    }
    let evaluator = Evaluator::new(completion_provider(config, keys)?, eval_config)?;

    let report = match &args.context {
        Some(corpus_path) => {
            let (embedder, reranker) = retrieval_providers(config, keys)?;
            let retriever =
                Retriever::new(embedder, reranker, evaluator.config().embed_batch_size)?;
            let questions = load_questions(&args.questions)?;
            evaluate_with_context(&evaluator, &questions, corpus_path, retriever).await?
        }
        None => {
            let questions = load_questions(&args.questions)?;
            evaluator.evaluate_all(&questions).await?
        }
    };

    println!("{}", render_report(&report, args.output.as_deref(), formatter)?);
    Ok(())
}

/// Index the corpus at `corpus_path` and evaluate with retrieved context.
///
/// An empty question set is rejected before the corpus is embedded.
pub async fn evaluate_with_context<L, E, R>(
    evaluator: &Evaluator<L>,
    questions: &[QuestionRecord],
    corpus_path: &Path,
    mut retriever: Retriever<E, R>,
) -> Result<EvaluationReport>
where
    L: CompletionProvider,
    E: EmbeddingProvider,
    R: RerankProvider,
{
    if questions.is_empty() {
        return Err(EvalError::EmptyQuestionSet.into());
    }
    let corpus = load_corpus(corpus_path)?;
    if corpus.is_empty() {
        warn!("Context corpus {} is empty", corpus_path.display());
    }
    retriever.index(&corpus).await?;
    Ok(evaluator
        .evaluate_all_with_retrieval(questions, &retriever)
        .await?)
}

/// Save the report when asked to, then render it.
pub fn render_report(
    report: &EvaluationReport,
    output: Option<&Path>,
    formatter: &Formatter,
) -> Result<String> {
    let mut rendered = formatter.format_report(report)?;
    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        fs::write(path, json)?;
        info!("Detailed results saved to {}", path.display());
        rendered.push('\n');
        rendered.push_str(&formatter.info(&format!("Detailed results saved to {}", path.display())));
    }
    Ok(rendered)
}
