//! CLI argument definitions

use chainseed_generator::{
    DEFAULT_PATTERN_BYTES, GeneratorArgs, GeneratorConfig, KdfConfig, KdfVariant,
    MAX_ITERATION_COUNT, MAX_MEMORY_COST_KIB, MAX_PATTERN_BYTES, TimeCostPolicy,
};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};

/// Default number of bytes written per block
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Smallest Argon2 memory cost accepted on the command line (16 MiB)
pub const MIN_CLI_MEMORY_KIB: u32 = 16 * 1024;

/// Write a deterministic byte stream derived from a password to stdout
#[derive(Parser)]
#[command(name = "chainseed")]
#[command(version)]
pub struct Cli {
    /// Secret password
    pub password: String,

    /// Confusion string; selects the salt and the reseed pattern
    pub confusion: String,

    /// Number of reseed rounds (0..=65535)
    #[arg(value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_ITERATION_COUNT)))]
    pub iteration_count: u32,

    /// Stop after this many bytes (default: write forever)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Length of the reseed pattern in bytes
    #[arg(
        long,
        default_value_t = DEFAULT_PATTERN_BYTES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_PATTERN_BYTES as u64)
    )]
    pub pattern_bytes: usize,

    /// Bytes written per block
    #[arg(
        long,
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub block_size: usize,

    /// Argon2 parameter preset the other KDF flags refine
    #[arg(long, value_enum, default_value_t = KdfPreset::Reference)]
    pub preset: KdfPreset,

    /// Argon2 memory cost in KiB, 16384..=1048576 (default: from the preset)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_CLI_MEMORY_KIB)..=i64::from(MAX_MEMORY_COST_KIB))
    )]
    pub memory_kib: Option<u32>,

    /// Fixed Argon2 time cost (default: scaled with the iteration count)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub time_cost: Option<u32>,

    /// Argon2 variant used for the bootstrap (default: from the preset)
    #[arg(long, value_enum)]
    pub kdf: Option<KdfArg>,

    /// Log per-round scan lengths and timings to stderr
    #[arg(long)]
    pub report: bool,
}

/// Argon2 presets selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KdfPreset {
    /// Argon2i, 64 MiB
    Reference,
    /// Argon2id, 1 GiB
    Hardened,
}

impl From<KdfPreset> for KdfConfig {
    fn from(preset: KdfPreset) -> Self {
        match preset {
            KdfPreset::Reference => KdfConfig::reference(),
            KdfPreset::Hardened => KdfConfig::hardened(),
        }
    }
}

/// Argon2 variant as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KdfArg {
    /// Argon2i
    Argon2i,
    /// Argon2id
    Argon2id,
}

impl From<KdfArg> for KdfVariant {
    fn from(arg: KdfArg) -> Self {
        match arg {
            KdfArg::Argon2i => KdfVariant::Argon2i,
            KdfArg::Argon2id => KdfVariant::Argon2id,
        }
    }
}

impl Cli {
    /// Generator inputs taken from the positional arguments
    #[must_use]
    pub fn generator_args(&self) -> GeneratorArgs {
        GeneratorArgs::new(
            self.password.as_bytes(),
            self.confusion.as_bytes(),
            self.iteration_count,
        )
    }

    /// Generator configuration built from the chosen preset and the flags
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut kdf = KdfConfig::from(self.preset);
        if let Some(variant) = self.kdf {
            kdf.variant = variant.into();
        }
        if let Some(memory_kib) = self.memory_kib {
            kdf.memory_cost = memory_kib;
        }
        if let Some(passes) = self.time_cost {
            kdf.time_cost = TimeCostPolicy::Fixed(passes);
        }
        GeneratorConfig::default()
            .with_pattern_bytes(self.pattern_bytes)
            .with_kdf(kdf)
    }
}
