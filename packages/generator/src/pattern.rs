//! Target pattern for the reseed search

use crate::config::MAX_PATTERN_BYTES;
use crate::error::{GeneratorError, Result};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte pattern the reseeder searches for in the keystream
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Pattern(Vec<u8>);

impl Pattern {
    /// Use explicit bytes as the pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidPatternLength` unless `1 <= bytes.len() <= 32`.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        check_len(bytes.len())?;
        Ok(Self(bytes.to_vec()))
    }

    /// Pattern bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Pattern length in bytes (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; patterns hold at least one byte
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Pattern({} bytes)", self.0.len())
    }
}

/// First `pattern_bytes` bytes of SHA-256(confusion)
///
/// # Errors
///
/// Returns `InvalidPatternLength` unless `1 <= pattern_bytes <= 32`.
pub fn derive_pattern(confusion: &[u8], pattern_bytes: usize) -> Result<Pattern> {
    check_len(pattern_bytes)?;
    let digest = Sha256::digest(confusion);
    Ok(Pattern(digest[..pattern_bytes].to_vec()))
}

fn check_len(len: usize) -> Result<()> {
    if (1..=MAX_PATTERN_BYTES).contains(&len) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidPatternLength {
            requested: len,
            max: MAX_PATTERN_BYTES,
        })
    }
}
