//! Main entry point for the chainseed CLI

use chainseed_cli::{Cli, is_broken_pipe};
use chainseed_common::LoggingTransformer;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging
    if cli.report {
        LoggingTransformer::init_with_default("info");
    } else {
        LoggingTransformer::init();
    }

    match chainseed_cli::run(&cli) {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        result => result,
    }
}
