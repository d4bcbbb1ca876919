// po-agent - Product Owner assistant
// Main entry point

use anyhow::Result;
use clap::Parser;

use po_agent::cli::{commands, Cli};
use po_agent::config::load_config;
use po_agent::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.global.verbose)?;

    let config = load_config()?;
    tracing::debug!(?config, "Configuration loaded");

    commands::run(cli, config).await
}
