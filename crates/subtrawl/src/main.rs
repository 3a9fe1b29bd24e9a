//! subtrawl - proxy subscription aggregation
//!
//! # Usage
//!
//! ```bash
//! # Fetch, merge, rank and write subscription artifacts (default)
//! subtrawl
//! subtrawl --config config.toml run --output ./subscriptions
//!
//! # Re-encode a damaged subscription file
//! subtrawl fix subscriptions/subscription_all.txt
//! ```

mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use subtrawl_config::Config;

/// subtrawl - proxy subscription aggregation
#[derive(Parser, Debug)]
#[command(name = "subtrawl")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the aggregation pipeline and write artifacts
    Run(cmd::run::RunArgs),

    /// Re-encode an existing subscription file
    Fix(cmd::fix::FixArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    match cli.command.take() {
        Some(Command::Fix(args)) => {
            init_logging(cli.log_level.as_deref().unwrap_or("info"))?;
            cmd::fix::run(args)
        }
        Some(Command::Run(args)) => run_pipeline(&cli, args).await,
        // No subcommand = run the pipeline (default behavior)
        None => run_pipeline(&cli, cmd::run::RunArgs::default()).await,
    }
}

/// Load config, initialize logging, run the pipeline
async fn run_pipeline(cli: &Cli, args: cmd::run::RunArgs) -> Result<()> {
    let config = Config::from_file(&cli.config)?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| config.log.level.as_str());
    init_logging(level)?;

    tracing::info!(config = %cli.config.display(), "configuration loaded");
    cmd::run::run(config, args).await
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
