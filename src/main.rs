//! CLI entry point for lockarena.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lockarena::cli::Cli;
use lockarena::harness;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli
        .into_config()
        .context("invalid configuration")?;

    harness::run(&config).context("lockarena run failed")?;
    Ok(())
}
