//! Generator and key derivation configuration
//!
//! Argon2 variant, memory cost and the time-cost policy all change the bootstrap
//! seed, and therefore the whole output stream. Two runs reproduce each other only
//! when every field here matches.

use crate::error::{GeneratorError, Result};

/// Default pattern length in bytes
pub const DEFAULT_PATTERN_BYTES: usize = 2;

/// Largest pattern length (the pattern is a prefix of a SHA-256 digest)
pub const MAX_PATTERN_BYTES: usize = 32;

/// Largest number of reseed rounds accepted by the generator
pub const MAX_ITERATION_COUNT: u32 = u16::MAX as u32;

/// Smallest Argon2 memory cost in KiB (eight blocks per lane, one lane)
pub const MIN_MEMORY_COST_KIB: u32 = 8;

/// Largest Argon2 memory cost in KiB (1 GiB)
pub const MAX_MEMORY_COST_KIB: u32 = 1024 * 1024;

/// Largest `max - min` span of [`TimeCostPolicy::Scaled`]
pub const MAX_SCALED_SPAN: u32 = 8;

/// Argon2 variants usable for the bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KdfVariant {
    /// Argon2i (data-independent addressing)
    #[default]
    Argon2i,
    /// Argon2id (hybrid addressing)
    Argon2id,
}

impl KdfVariant {
    pub(crate) fn algorithm(self) -> argon2::Algorithm {
        match self {
            Self::Argon2i => argon2::Algorithm::Argon2i,
            Self::Argon2id => argon2::Algorithm::Argon2id,
        }
    }
}

/// How the Argon2 time cost (number of passes) is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCostPolicy {
    /// Always use the given number of passes
    Fixed(u32),
    /// Grow logarithmically with the iteration count:
    /// `min + floor((max - min) * log10(IC) / 4)`, clamped to `[min, max]`,
    /// with `IC = 0` mapping to `min`
    Scaled {
        /// Passes used for small iteration counts
        min: u32,
        /// Upper bound on passes
        max: u32,
    },
}

impl Default for TimeCostPolicy {
    fn default() -> Self {
        Self::Scaled { min: 3, max: 6 }
    }
}

impl TimeCostPolicy {
    /// Argon2 time cost for the given iteration count
    ///
    /// The floor of the scaled formula is evaluated with integers:
    /// `floor(span * log10(ic) / 4) >= j` exactly when `ic^span >= 10^(4j)`.
    #[must_use]
    pub fn time_cost(&self, iteration_count: u32) -> u32 {
        match *self {
            Self::Fixed(passes) => passes,
            Self::Scaled { min, max } => {
                let span = max.saturating_sub(min).min(MAX_SCALED_SPAN);
                if iteration_count == 0 || span == 0 {
                    return min;
                }
                let scaled = u128::from(iteration_count.min(MAX_ITERATION_COUNT)).pow(span);
                let steps = (1..=span)
                    .take_while(|&j| scaled >= 10u128.pow(4 * j))
                    .count() as u32;
                min + steps
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed(0) => Err(GeneratorError::invalid_kdf_config(
                "fixed time cost must be at least 1",
            )),
            Self::Fixed(_) => Ok(()),
            Self::Scaled { min, max } => {
                if min == 0 {
                    return Err(GeneratorError::invalid_kdf_config(
                        "scaled time cost minimum must be at least 1",
                    ));
                }
                if max < min {
                    return Err(GeneratorError::invalid_kdf_config(format!(
                        "scaled time cost maximum {max} is below minimum {min}"
                    )));
                }
                if max - min > MAX_SCALED_SPAN {
                    return Err(GeneratorError::invalid_kdf_config(format!(
                        "scaled time cost span {} exceeds {MAX_SCALED_SPAN}",
                        max - min
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Argon2 parameters for the seed bootstrap
///
/// Parallelism is always 1 and the output is always one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfConfig {
    /// Argon2 variant
    pub variant: KdfVariant,
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Time cost policy
    pub time_cost: TimeCostPolicy,
}

impl KdfConfig {
    /// Argon2i, 64 MiB, scaled 3..=6 passes
    ///
    /// Matches the reference generator, so its golden vectors apply.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            variant: KdfVariant::Argon2i,
            memory_cost: 65536, // 64 MB
            time_cost: TimeCostPolicy::default(),
        }
    }

    /// Argon2id, 1 GiB, scaled 3..=6 passes
    #[must_use]
    pub fn hardened() -> Self {
        Self {
            variant: KdfVariant::Argon2id,
            memory_cost: MAX_MEMORY_COST_KIB,
            time_cost: TimeCostPolicy::default(),
        }
    }

    /// Argon2i, 1 MiB, scaled 3..=6 passes
    ///
    /// For tests and benchmarks; far too cheap for real passwords.
    #[must_use]
    pub fn lightweight() -> Self {
        Self {
            variant: KdfVariant::Argon2i,
            memory_cost: 1024,
            time_cost: TimeCostPolicy::default(),
        }
    }

    /// Check the memory bounds and the time-cost policy
    ///
    /// # Errors
    ///
    /// Returns `InvalidKdfConfig` if the memory cost is outside
    /// 8 KiB..=1 GiB or the time-cost policy is malformed.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MEMORY_COST_KIB..=MAX_MEMORY_COST_KIB).contains(&self.memory_cost) {
            return Err(GeneratorError::invalid_kdf_config(format!(
                "memory cost {} KiB outside {MIN_MEMORY_COST_KIB}..={MAX_MEMORY_COST_KIB} KiB",
                self.memory_cost
            )));
        }
        self.time_cost.validate()
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Full generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Length of the reseed pattern in bytes
    pub pattern_bytes: usize,
    /// Bootstrap KDF parameters
    pub kdf: KdfConfig,
}

impl GeneratorConfig {
    /// Replace the pattern length
    #[must_use]
    pub fn with_pattern_bytes(mut self, pattern_bytes: usize) -> Self {
        self.pattern_bytes = pattern_bytes;
        self
    }

    /// Replace the KDF parameters
    #[must_use]
    pub fn with_kdf(mut self, kdf: KdfConfig) -> Self {
        self.kdf = kdf;
        self
    }

    /// Check the pattern length and KDF parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidPatternLength` or `InvalidKdfConfig`.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PATTERN_BYTES).contains(&self.pattern_bytes) {
            return Err(GeneratorError::InvalidPatternLength {
                requested: self.pattern_bytes,
                max: MAX_PATTERN_BYTES,
            });
        }
        self.kdf.validate()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pattern_bytes: DEFAULT_PATTERN_BYTES,
            kdf: KdfConfig::default(),
        }
    }
}
