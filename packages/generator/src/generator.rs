//! Generator facade
//!
//! Drives the bootstrap and the reseed rounds, then serves output from the final
//! keystream.

use crate::bootstrap::bootstrap_seed;
use crate::config::{GeneratorConfig, MAX_ITERATION_COUNT};
use crate::error::{GeneratorError, Result};
use crate::keystream::KeystreamCipher;
use crate::pattern::derive_pattern;
use crate::reseed::PatternReseeder;
use chainseed_common::LoggingTransformer;
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

/// Inputs to one generator
///
/// The password is zeroized on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct GeneratorArgs {
    password: Zeroizing<Vec<u8>>,
    confusion: Vec<u8>,
    iteration_count: u32,
}

impl GeneratorArgs {
    /// Bundle password, confusion string and iteration count
    pub fn new(
        password: impl Into<Vec<u8>>,
        confusion: impl Into<Vec<u8>>,
        iteration_count: u32,
    ) -> Self {
        Self {
            password: Zeroizing::new(password.into()),
            confusion: confusion.into(),
            iteration_count,
        }
    }

    /// Confusion string bytes
    #[must_use]
    pub fn confusion(&self) -> &[u8] {
        &self.confusion
    }

    /// Number of reseed rounds
    #[must_use]
    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    fn validate(&self) -> Result<()> {
        if self.iteration_count > MAX_ITERATION_COUNT {
            return Err(GeneratorError::InvalidIterationCount {
                requested: self.iteration_count,
                max: MAX_ITERATION_COUNT,
            });
        }
        Ok(())
    }
}

impl core::fmt::Debug for GeneratorArgs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeneratorArgs")
            .field("password", &"REDACTED")
            .field("confusion", &LoggingTransformer::fingerprint(&self.confusion))
            .field("iteration_count", &self.iteration_count)
            .finish()
    }
}

/// Statistics for one reseed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStats {
    /// Zero-based round index
    pub round: u32,
    /// Bytes fed into the accumulator before the pattern matched
    pub bytes_scanned: u64,
}

/// Summary of one `setup()` call; holds no key material
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    /// Per-round statistics in execution order
    pub rounds: Vec<RoundStats>,
    /// Time spent in the Argon2 bootstrap
    pub bootstrap_elapsed: Duration,
    /// Time spent in the whole setup
    pub total_elapsed: Duration,
}

impl SetupReport {
    /// Bytes scanned across all rounds
    #[must_use]
    pub fn total_bytes_scanned(&self) -> u64 {
        self.rounds.iter().map(|r| r.bytes_scanned).sum()
    }
}

enum GeneratorState {
    Uninitialized,
    Ready(KeystreamCipher),
}

/// Deterministic keystream generator
///
/// Starts uninitialized. [`Generator::setup`] derives the final keystream;
/// after that [`Generator::next_block`] hands out its bytes in order.
pub struct Generator {
    args: GeneratorArgs,
    config: GeneratorConfig,
    state: GeneratorState,
}

impl Generator {
    /// Validate inputs and create an uninitialized generator
    ///
    /// # Errors
    ///
    /// Returns an input-validation error (`InvalidIterationCount`,
    /// `InvalidPatternLength` or `InvalidKdfConfig`) without doing any work.
    pub fn new(args: GeneratorArgs, config: GeneratorConfig) -> Result<Self> {
        args.validate()?;
        config.validate()?;
        Ok(Self {
            args,
            config,
            state: GeneratorState::Uninitialized,
        })
    }

    /// Run the bootstrap and all reseed rounds
    ///
    /// Calling `setup` again discards the current keystream and derives it from
    /// scratch, so output restarts at the beginning of the same stream.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` if Argon2 fails, or `KeystreamExhausted` if a
    /// reseed round runs off the end of its keystream. The generator is left
    /// uninitialized in both cases.
    pub fn setup(&mut self) -> Result<SetupReport> {
        self.state = GeneratorState::Uninitialized;
        let started = Instant::now();

        tracing::info!(
            confusion = %LoggingTransformer::fingerprint(&self.args.confusion),
            iteration_count = self.args.iteration_count,
            pattern_bytes = self.config.pattern_bytes,
            "generator setup started"
        );

        let seed = bootstrap_seed(
            &self.args.password,
            &self.args.confusion,
            self.args.iteration_count,
            &self.config.kdf,
        )
        .inspect_err(|e| LoggingTransformer::log_crypto_error("bootstrap", e))?;
        let bootstrap_elapsed = started.elapsed();

        let pattern = derive_pattern(&self.args.confusion, self.config.pattern_bytes)?;
        let reseeder = PatternReseeder::new(&pattern);

        let mut cipher = KeystreamCipher::new(&seed);
        drop(seed);

        let mut rounds = Vec::with_capacity(self.args.iteration_count as usize);
        for round in 0..self.args.iteration_count {
            let outcome = reseeder.reseed(&mut cipher)?;
            cipher = KeystreamCipher::new(&outcome.seed);
            tracing::debug!(round, bytes_scanned = outcome.bytes_scanned, "reseed round complete");
            rounds.push(RoundStats {
                round,
                bytes_scanned: outcome.bytes_scanned,
            });
        }

        self.state = GeneratorState::Ready(cipher);

        let report = SetupReport {
            rounds,
            bootstrap_elapsed,
            total_elapsed: started.elapsed(),
        };
        LoggingTransformer::log_performance_metric("generator setup", report.total_elapsed, true);
        Ok(report)
    }

    /// Whether `setup` has completed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, GeneratorState::Ready(_))
    }

    /// Fill `block` with the next output bytes
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` before `setup` has completed, even for an empty
    /// block. Returns `KeystreamExhausted` once the final keystream is used up;
    /// every later call fails the same way until `setup` runs again.
    pub fn fill_block(&mut self, block: &mut [u8]) -> Result<()> {
        match &mut self.state {
            GeneratorState::Uninitialized => Err(GeneratorError::Uninitialized),
            GeneratorState::Ready(cipher) => cipher.fill(block).inspect_err(|e| {
                tracing::warn!(error = %e, "output keystream exhausted");
            }),
        }
    }

    /// Return the next `n` output bytes
    ///
    /// `n = 0` returns an empty vector without advancing the stream.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` before `setup` has completed and
    /// `KeystreamExhausted` at the end of the output keystream.
    pub fn next_block(&mut self, n: usize) -> Result<Vec<u8>> {
        if !self.is_ready() {
            return Err(GeneratorError::Uninitialized);
        }
        let mut block = vec![0u8; n];
        self.fill_block(&mut block)?;
        Ok(block)
    }

    /// Output bytes handed out since the last `setup`, if ready
    #[must_use]
    pub fn bytes_generated(&self) -> Option<u64> {
        match &self.state {
            GeneratorState::Uninitialized => None,
            GeneratorState::Ready(cipher) => Some(cipher.position()),
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl core::fmt::Debug for Generator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generator")
            .field("args", &self.args)
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .finish()
    }
}
