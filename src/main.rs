//! nutrilabel - nutrition facts for web content
//!
//! A local-first CLI that scores page text for fact density, bias,
//! emotional load, perspective diversity, complexity and source credibility.

use anyhow::Result;
use clap::Parser;
use nutrilabel::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level; logs go to stderr so stdout stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
