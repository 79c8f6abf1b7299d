//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use lexqa_llm::ProviderKind;
use std::path::PathBuf;

/// lexqa - Build and score multiple-choice legal exam datasets.
#[derive(Debug, Parser)]
#[command(name = "lexqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Completion provider, overriding the configuration
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderArg>,

    /// Completion model, overriding the configuration
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Mistral API key
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true, global = true)]
    pub mistral_api_key: Option<String>,

    /// Cohere API key
    #[arg(long, env = "COHERE_API_KEY", hide_env_values = true, global = true)]
    pub cohere_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Mistral AI
    Mistral,
    /// Cohere
    Cohere,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract questions from a raw exam text file
    Extract(ExtractArgs),

    /// Assign a legal category to every question in a dataset
    Categorize(CategorizeArgs),

    /// Merge categorized datasets and keep one category
    Merge(MergeArgs),

    /// Build a context corpus from a statute or markdown file
    Corpus(CorpusArgs),

    /// Ask the model every question and report accuracy
    Evaluate(EvaluateArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Raw exam text, answer key on the last line
    pub input: PathBuf,

    /// Output dataset (default: questions.json next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Chunk core size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap on each side of a chunk in characters
    #[arg(long)]
    pub window_size: Option<usize>,
}

/// Arguments for the categorize command.
#[derive(Debug, Parser)]
pub struct CategorizeArgs {
    /// Question dataset
    pub input: PathBuf,

    /// Output dataset (default: categorized_questions.json next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    /// Directory searched recursively for categorized datasets
    pub input_dir: PathBuf,

    /// Category to keep (e.g. penal, civil)
    pub category: String,

    /// Output dataset
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the corpus command.
#[derive(Debug, Parser)]
pub struct CorpusArgs {
    /// Source text
    pub input: PathBuf,

    /// Output corpus
    #[arg(short, long)]
    pub output: PathBuf,

    /// How the source is split into documents
    #[arg(short, long, value_enum, default_value = "articles")]
    pub split: SplitArg,
}

/// Corpus split mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SplitArg {
    /// One document per `Artículo N.`
    Articles,
    /// One document per `## ` heading
    Markdown,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Question dataset
    pub questions: PathBuf,

    /// Context corpus; enables retrieval-augmented answering
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Context passages per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Mistral => ProviderKind::Mistral,
            ProviderArg::Cohere => ProviderKind::Cohere,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "lexqa",
            "extract",
            "exam.txt",
            "-o",
            "out.json",
            "--chunk-size",
            "1500",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.input, PathBuf::from("exam.txt"));
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert_eq!(args.chunk_size, Some(1500));
                assert_eq!(args.window_size, None);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_merge_command() {
        let cli = Cli::parse_from(["lexqa", "merge", "data", "penal", "-o", "penal.json"]);
        match cli.command {
            Command::Merge(args) => {
                assert_eq!(args.category, "penal");
                assert_eq!(args.output, PathBuf::from("penal.json"));
            }
            _ => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn test_corpus_split_default() {
        let cli = Cli::parse_from(["lexqa", "corpus", "ce.txt", "-o", "ce.json"]);
        match cli.command {
            Command::Corpus(args) => assert_eq!(args.split, SplitArg::Articles),
            _ => panic!("Expected Corpus command"),
        }

        let cli = Cli::parse_from(["lexqa", "corpus", "a.md", "-o", "a.json", "--split", "markdown"]);
        match cli.command {
            Command::Corpus(args) => assert_eq!(args.split, SplitArg::Markdown),
            _ => panic!("Expected Corpus command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lexqa",
            "evaluate",
            "q.json",
            "--context",
            "ce.json",
            "-k",
            "5",
            "--provider",
            "cohere",
            "--model",
            "command-r-plus",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.provider, Some(ProviderArg::Cohere)));
        assert_eq!(cli.model.as_deref(), Some("command-r-plus"));
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.context, Some(PathBuf::from("ce.json")));
                assert_eq!(args.top_k, Some(5));
            }
            _ => panic!("Expected Evaluate command"),
        }
    }

    #[test]
    fn test_api_key_flags() {
        let cli = Cli::parse_from([
            "lexqa",
            "--mistral-api-key",
            "m-key",
            "--cohere-api-key",
            "c-key",
            "config",
            "show",
        ]);
        assert_eq!(cli.mistral_api_key.as_deref(), Some("m-key"));
        assert_eq!(cli.cohere_api_key.as_deref(), Some("c-key"));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["lexqa"]).is_err());
    }

    #[test]
    fn test_provider_conversion() {
        let kind: ProviderKind = ProviderArg::Mistral.into();
        assert_eq!(kind, ProviderKind::Mistral);
    }
}
