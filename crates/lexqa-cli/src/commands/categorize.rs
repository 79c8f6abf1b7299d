//! Categorize command implementation.

use super::{completion_provider, sibling_path, ApiKeys};
use crate::cli::CategorizeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexqa_domain::traits::CompletionProvider;
use lexqa_eval::{Categorizer, CategorizerConfig};
use lexqa_store::{load_questions, save_questions, DATASET_FILE_NAME};

/// Execute the categorize command.
pub async fn execute_categorize(
    args: CategorizeArgs,
    config: &Config,
    keys: &ApiKeys,
    formatter: &Formatter,
) -> Result<()> {
    let provider = completion_provider(config, keys)?;
    let output = run_categorize(args, config.categorizer.clone(), provider, formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Categorize a dataset and save it.
///
/// The output defaults to the merge-able dataset name so that `merge` can
/// find it.
pub async fn run_categorize<L>(
    args: CategorizeArgs,
    categorizer_config: CategorizerConfig,
    provider: L,
    formatter: &Formatter,
) -> Result<String>
where
    L: CompletionProvider,
{
    let mut questions = load_questions(&args.input)?;
    let categorizer = Categorizer::new(provider, categorizer_config);
    let summary = categorizer.categorize_all(&mut questions).await?;

    let output_path = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, DATASET_FILE_NAME));
    save_questions(&output_path, &questions)?;

    Ok(formatter.categorize_summary(&summary, &output_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use lexqa_domain::{Category, Choice, QuestionRecord};
    use lexqa_llm::MockProvider;
    use tempfile::TempDir;

    fn question(id: u32, category: Option<Category>) -> QuestionRecord {
        let options = Choice::ALL.iter().map(|c| (*c, c.to_string())).collect();
        let mut record = QuestionRecord::new(id, format!("Pregunta {}", id), options);
        record.category = category;
        record
    }

    #[tokio::test]
    async fn test_categorize_writes_categorized_dataset() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("questions.json");
        save_questions(
            &input,
            &[question(1, None), question(2, Some(Category::Civil)), question(3, None)],
        )
        .unwrap();

        let provider = MockProvider::with_sequence(["Penal", "Derecho Civil."]);
        let args = CategorizeArgs {
            input,
            output: None,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = run_categorize(args, CategorizerConfig::default(), provider.clone(), &formatter)
            .await
            .unwrap();

        assert!(output.contains("Categorized 2 question(s), 1 already categorized"));
        assert_eq!(provider.call_count(), 2);

        let saved = load_questions(dir.path().join(DATASET_FILE_NAME)).unwrap();
        let categories: Vec<Option<Category>> = saved.iter().map(|q| q.category).collect();
        assert_eq!(
            categories,
            vec![Some(Category::Penal), Some(Category::Civil), Some(Category::Otros)]
        );
    }

    #[tokio::test]
    async fn test_missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let args = CategorizeArgs {
            input: dir.path().join("missing.json"),
            output: None,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result =
            run_categorize(args, CategorizerConfig::default(), MockProvider::new("Penal"), &formatter)
                .await;
        assert!(result.is_err());
    }
}
