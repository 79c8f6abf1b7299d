//! Extract command implementation.

use super::{completion_provider, sibling_path, ApiKeys};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexqa_domain::traits::CompletionProvider;
use lexqa_extractor::{Extractor, ExtractorConfig};
use lexqa_store::save_questions;
use std::fs;
use std::path::PathBuf;

/// Default dataset name written next to the input.
pub const QUESTIONS_FILE_NAME: &str = "questions.json";

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    keys: &ApiKeys,
    formatter: &Formatter,
) -> Result<()> {
    let provider = completion_provider(config, keys)?;
    let output = run_extract(args, config.extractor.clone(), provider, formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Extract, save, and render the result.
pub async fn run_extract<L>(
    args: ExtractArgs,
    mut extractor_config: ExtractorConfig,
    provider: L,
    formatter: &Formatter,
) -> Result<String>
where
    L: CompletionProvider,
{
    if let Some(chunk_size) = args.chunk_size {
        extractor_config.chunk_size = chunk_size;
    }
    if let Some(window_size) = args.window_size {
        extractor_config.window_size = window_size;
    }
    let extractor = Extractor::new(provider, extractor_config)?;

    let text = fs::read_to_string(&args.input)?;
    let result = extractor.extract_document(&text).await?;

    let output_path: PathBuf = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, QUESTIONS_FILE_NAME));
    save_questions(&output_path, &result.questions)?;

    let mut lines = vec![formatter.format_questions(&result.questions)?];
    for id in &result.metadata.missing_answers {
        lines.push(formatter.warning(&format!("Question {} has no answer key entry", id)));
    }
    if !result.failures.is_empty() {
        lines.push(formatter.warning(&format!(
            "Dropped {} malformed block(s)",
            result.failures.len()
        )));
    }
    lines.push(formatter.saved("question(s)", result.questions.len(), &output_path));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use lexqa_llm::MockProvider;
    use lexqa_store::load_questions;
    use tempfile::TempDir;

    const RESPONSE: &str = "1\n¿Primera?\na) uno\nb) dos\nc) tres\nd) cuatro\n\n\
                            2\n¿Segunda?\na) uno\nb) dos\nc) tres\nd) cuatro";

    #[tokio::test]
    async fn test_extract_writes_dataset_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("text.txt");
        fs::write(&input, "1. ¿Primera?\n2. ¿Segunda?\n1 c 2 a\n").unwrap();

        let args = ExtractArgs {
            input: input.clone(),
            output: None,
            chunk_size: None,
            window_size: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = run_extract(
            args,
            ExtractorConfig::default(),
            MockProvider::new(RESPONSE),
            &formatter,
        )
        .await
        .unwrap();
        assert!(output.starts_with("1\n2"));

        let saved = load_questions(dir.path().join(QUESTIONS_FILE_NAME)).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].correct_answer.map(|c| c.to_string()).as_deref(), Some("c"));
        assert_eq!(saved[1].correct_answer.map(|c| c.to_string()).as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_missing_answers_are_reported() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("text.txt");
        let output_path = dir.path().join("out").join("q.json");
        fs::write(&input, "1. ¿Primera?\n2. ¿Segunda?\n1 c\n").unwrap();

        let args = ExtractArgs {
            input,
            output: Some(output_path.clone()),
            chunk_size: Some(5000),
            window_size: Some(0),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = run_extract(
            args,
            ExtractorConfig::default(),
            MockProvider::new(RESPONSE),
            &formatter,
        )
        .await
        .unwrap();

        assert!(output.contains("Question 2 has no answer key entry"));
        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("text.txt");
        fs::write(&input, "1. ¿Primera?\n1 a\n").unwrap();

        let provider = MockProvider::new(RESPONSE);
        provider.push_error();
        let args = ExtractArgs {
            input,
            output: None,
            chunk_size: None,
            window_size: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = run_extract(args, ExtractorConfig::default(), provider, &formatter).await;

        assert!(result.is_err());
        assert!(!dir.path().join(QUESTIONS_FILE_NAME).exists());
    }
}
