//! Lexicon CLI - export spell-check dictionaries from a lexicon database.

use clap::Parser;
use lexicon_cli::commands;
use lexicon_cli::{Cli, Command, Config, Formatter};
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

/// Log to stderr, filtered by `RUST_LOG` when set
fn init_tracing(verbose: bool) {
    let default = if verbose { "lexicon=debug" } else { "lexicon=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> lexicon_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli);
    config.validate()?;

    let formatter = Formatter::new(config.settings.format, config.settings.color);

    match cli.command {
        Command::Export(args) => commands::execute_export(args, &config, &formatter).await?,
        Command::Latest(args) => commands::execute_latest(args, &config, &formatter).await?,
        Command::UpdateInfo(args) => commands::execute_update_info(args, &config, &formatter).await?,
        Command::AffixTest(args) => commands::execute_affix_test(args, &config, &formatter).await?,
        Command::Import(args) => commands::execute_import(args, &config, &formatter).await?,
    }

    Ok(())
}
