//! Granulo CLI
//!
//! Sieve analysis, soil classification and the HTTP API from one binary.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use granulo_api::ApiConfig;
use granulo_cli::cli::{Cli, Command};
use granulo_cli::{commands, config_handlers};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config_path = cli.config.as_deref();
    let output = match &cli.command {
        Command::Gradation(args) => commands::run_gradation(args)?,
        Command::Classify(args) => commands::run_classify(args)?,
        Command::Serve(args) => {
            commands::run_serve(config_path, args).await?;
            return Ok(());
        }
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action.clone())?
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
///
/// `RUST_LOG` wins, then `--verbose`, then the configured filter.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            let directive = ApiConfig::load(cli.config.as_deref())
                .map(|config| config.logging.filter)
                .unwrap_or_else(|_| ApiConfig::default().logging.filter);
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
