//! # chap — chaperone CLI
//!
//! Container entrypoint wrapper.
//! Launches the ownership reconciliation loop alongside the primary
//! workload, then gets out of the way.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
