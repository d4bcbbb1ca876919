// Logging setup
//
// tracing + tracing-subscriber, filtered by RUST_LOG. `log` records from
// dependencies (reqwest, hyper) are bridged into tracing.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_FILTER: &str = "po_agent=info,tower_http=info";
pub const VERBOSE_FILTER: &str = "po_agent=debug,tower_http=debug";

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;

    Ok(())
}
