//! lexqa CLI - Build and score multiple-choice legal exam datasets.

use clap::Parser;
use lexqa_cli::cli::ConfigAction;
use lexqa_cli::commands::{self, ApiKeys};
use lexqa_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> lexqa_cli::Result<()> {
    // `config init` must work before any file exists
    let mut config = match &cli.command {
        Command::Config(args) if matches!(args.action, ConfigAction::Init { .. }) => {
            Config::default()
        }
        _ => Config::load(cli.config.as_deref())?,
    };
    config.override_provider(cli.provider.map(Into::into), cli.model.clone());

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let keys = ApiKeys::from(&cli);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &keys, &formatter).await?;
        }
        Command::Categorize(args) => {
            commands::execute_categorize(args, &config, &keys, &formatter).await?;
        }
        Command::Merge(args) => {
            commands::execute_merge(args, &formatter)?;
        }
        Command::Corpus(args) => {
            commands::execute_corpus(args, &formatter)?;
        }
        Command::Evaluate(args) => {
            commands::execute_evaluate(args, &config, &keys, &formatter).await?;
        }
        Command::Config(args) => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::default_path()?,
            };
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
