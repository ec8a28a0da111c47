//! # chainseed CLI
//!
//! Argument parsing and output plumbing for the `chainseed` binary.

#![forbid(unsafe_code)]

pub mod cli;
pub mod output;

pub use cli::{Cli, DEFAULT_BLOCK_SIZE, KdfArg, KdfPreset, MIN_CLI_MEMORY_KIB};
pub use output::{is_broken_pipe, write_blocks};

use anyhow::Context;
use chainseed_generator::Generator;
use std::io::{self, BufWriter};

/// Set up a generator from `cli` and stream its output to stdout
///
/// # Errors
///
/// Fails on invalid arguments, key-derivation failure or output errors. A
/// closed stdout is reported like any other write error; callers decide
/// whether it counts as success.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut generator = Generator::new(cli.generator_args(), cli.generator_config())
        .context("invalid generator arguments")?;

    let report = generator.setup().context("generator setup failed")?;
    if cli.report {
        let config = generator.config();
        tracing::info!(
            variant = ?config.kdf.variant,
            memory_kib = config.kdf.memory_cost,
            pattern_bytes = config.pattern_bytes,
            "generator configuration"
        );
        for round in &report.rounds {
            tracing::info!(round = round.round, bytes_scanned = round.bytes_scanned, "reseed round");
        }
        tracing::info!(
            rounds = report.rounds.len(),
            total_bytes_scanned = report.total_bytes_scanned(),
            bootstrap_ms = report.bootstrap_elapsed.as_millis() as u64,
            total_ms = report.total_elapsed.as_millis() as u64,
            "setup report"
        );
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_blocks(&mut generator, &mut out, cli.block_size, cli.limit)?;
    Ok(())
}
