//! Error handling for the generator

use thiserror::Error;

/// Generator-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Output was requested before `setup()` completed
    #[error("Generator is uninitialized: call setup() before requesting output")]
    Uninitialized,

    /// Pattern length outside the supported range
    #[error("Invalid pattern length: {requested} (must be between 1 and {max})")]
    InvalidPatternLength {
        /// Requested pattern length in bytes
        requested: usize,
        /// Largest supported pattern length in bytes
        max: usize,
    },

    /// Iteration count outside the supported range
    #[error("Invalid iteration count: {requested} (must be at most {max})")]
    InvalidIterationCount {
        /// Requested number of reseed rounds
        requested: u32,
        /// Largest supported number of reseed rounds
        max: u32,
    },

    /// Key derivation parameters rejected before use
    #[error("Invalid KDF configuration: {0}")]
    InvalidKdfConfig(String),

    /// Argon2 failed while deriving the bootstrap seed
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// The ChaCha20 block counter of the current seed is used up
    #[error("Keystream exhausted after {position} bytes")]
    KeystreamExhausted {
        /// Bytes handed out under the current seed before the failure
        position: u64,
    },
}

impl GeneratorError {
    /// Create an `InvalidKdfConfig` error
    #[must_use]
    pub fn invalid_kdf_config(msg: impl Into<String>) -> Self {
        Self::InvalidKdfConfig(msg.into())
    }

    /// Create a `KeyDerivation` error
    #[must_use]
    pub fn key_derivation(msg: impl Into<String>) -> Self {
        Self::KeyDerivation(msg.into())
    }

    /// Whether the error was caused by caller input rather than generator state
    #[must_use]
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPatternLength { .. }
                | Self::InvalidIterationCount { .. }
                | Self::InvalidKdfConfig(_)
        )
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
