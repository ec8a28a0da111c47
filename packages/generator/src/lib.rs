//! # chainseed generator
//!
//! Deterministic, unbounded byte streams from a password and a confusion string.
//!
//! Setup stretches the password with Argon2 into a 32-byte seed, keys ChaCha20
//! with it and then runs a configurable number of reseed rounds. Each round scans
//! the keystream for a short pattern derived from the confusion string, hashes
//! everything scanned before the match together with the 32 bytes after it, and
//! re-keys the cipher with the result. Output is the keystream of the final
//! cipher.
//!
//! ```no_run
//! use chainseed_generator::{Generator, GeneratorArgs, GeneratorConfig};
//!
//! # fn main() -> chainseed_generator::Result<()> {
//! let args = GeneratorArgs::new("correct horse", "battery staple", 1);
//! let mut generator = Generator::new(args, GeneratorConfig::default())?;
//! generator.setup()?;
//! let block = generator.next_block(1024)?;
//! assert_eq!(block.len(), 1024);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod generator;
pub mod keystream;
pub mod pattern;
pub mod reseed;
pub mod seed;

// Re-export error types
pub use error::{GeneratorError, Result};

// Re-export the main API
pub use bootstrap::{bootstrap_seed, derive_salt};
pub use config::{
    DEFAULT_PATTERN_BYTES, GeneratorConfig, KdfConfig, KdfVariant, MAX_ITERATION_COUNT,
    MAX_MEMORY_COST_KIB, MAX_PATTERN_BYTES, TimeCostPolicy,
};
pub use generator::{Generator, GeneratorArgs, RoundStats, SetupReport};
pub use keystream::KeystreamCipher;
pub use pattern::{Pattern, derive_pattern};
pub use reseed::{PatternReseeder, ReseedOutcome};
pub use seed::Seed;
