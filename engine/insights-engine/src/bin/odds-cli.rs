//! # Odds CLI Binary
//!
//! Command-line interface for exploring pull-rate data.

use anyhow::Result;
use clap::Parser;
use insights_engine::cli::{Cli, CliHandler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create CLI handler
    let handler = CliHandler::new(&cli).await?;

    // Handle command
    handler.handle_command(cli.command)?;

    Ok(())
}
