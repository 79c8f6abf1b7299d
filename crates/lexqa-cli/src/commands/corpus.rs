//! Corpus command implementation.

use crate::cli::{CorpusArgs, SplitArg};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lexqa_store::{save_corpus, split_articles, split_markdown_sections};
use std::fs;
use tracing::info;

/// Execute the corpus command.
pub fn execute_corpus(args: CorpusArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", run_corpus(args, formatter)?);
    Ok(())
}

/// Split the source text and save the corpus.
pub fn run_corpus(args: CorpusArgs, formatter: &Formatter) -> Result<String> {
    let text = fs::read_to_string(&args.input)?;
    let documents = match args.split {
        SplitArg::Articles => split_articles(&text),
        SplitArg::Markdown => split_markdown_sections(&text),
    };

    if documents.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "No sections found in {}",
            args.input.display()
        )));
    }
    info!("Split {} into {} documents", args.input.display(), documents.len());

    save_corpus(&args.output, &documents)?;
    Ok(formatter.saved("document(s)", documents.len(), &args.output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use lexqa_store::load_corpus;
    use tempfile::TempDir;

    #[test]
    fn test_articles_corpus() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ce.txt");
        fs::write(
            &input,
            "TÍTULO PRELIMINAR\nArtículo 1.\nEspaña se constituye en un Estado social.\n\
             Artículo 2.\nLa Constitución se fundamenta en la indisoluble unidad.\n",
        )
        .unwrap();

        let output = dir.path().join("ce.json");
        let args = CorpusArgs {
            input,
            output: output.clone(),
            split: SplitArg::Articles,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let message = run_corpus(args, &formatter).unwrap();
        assert!(message.contains("Saved 2 document(s)"));

        let corpus = load_corpus(&output).unwrap();
        assert_eq!(corpus[0].text(), "Artículo 1. España se constituye en un Estado social.");
    }

    #[test]
    fn test_markdown_corpus() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.md");
        fs::write(&input, "# Tema 1\n## Fuentes\nLa ley y la costumbre.\n## Eficacia\nLas leyes obligan.\n")
            .unwrap();

        let output = dir.path().join("notes.json");
        let args = CorpusArgs {
            input,
            output: output.clone(),
            split: SplitArg::Markdown,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        run_corpus(args, &formatter).unwrap();

        let corpus = load_corpus(&output).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[1].text(), "## Eficacia\nLas leyes obligan.");
    }

    #[test]
    fn test_no_sections_is_an_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.txt");
        fs::write(&input, "Sin artículos.").unwrap();

        let args = CorpusArgs {
            input,
            output: dir.path().join("out.json"),
            split: SplitArg::Articles,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(matches!(
            run_corpus(args, &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }
}
