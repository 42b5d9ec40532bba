//! Turn statements and receipts into transaction drafts.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{classify, config as config_cmd, receipt, statement};
use config::Config;

#[derive(Parser)]
#[command(name = "ledgerscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract transactions from a statement or transaction history
    Statement(statement::StatementArgs),

    /// Extract merchant, total, date and items from a receipt
    Receipt(receipt::ReceiptArgs),

    /// Print the category for a description
    Classify(classify::ClassifyArgs),

    /// Manage configuration
    Config(config_cmd::ConfigArgs),
}

fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path().context("could not determine the config directory")?,
    };
    let config = Config::load(&config_path)?;

    init_logging(cli.verbose, &config);
    tracing::debug!("Using config {}", config_path.display());

    match cli.command {
        Commands::Statement(args) => statement::run(args, &config).await,
        Commands::Receipt(args) => receipt::run(args, &config).await,
        Commands::Classify(args) => classify::run(args, &config).await,
        Commands::Config(args) => config_cmd::run(args, &config, &config_path).await,
    }
}
