//! Pattern-search reseeding
//!
//! One round scans the keystream with a window of `pattern.len()` bytes until the
//! window equals the pattern. Every byte that slides out of the window before the
//! match goes into a SHA-256 accumulator. The 32 bytes following the match are
//! then drawn and the next seed is `SHA-256(accumulator digest || those bytes)`.
//!
//! Expected scan length for a `k`-byte pattern is `256^k` bytes. The search has
//! no cutoff: stopping early would change the output for that seed.
//!
//! A match in the very first window is valid. The accumulator is then empty and
//! contributes SHA-256 of the empty string.

use crate::error::Result;
use crate::keystream::KeystreamCipher;
use crate::pattern::Pattern;
use crate::seed::{SEED_LEN, Seed};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Keystream bytes drawn after a match and mixed into the next seed
pub const LEADING_BYTES: usize = 32;

/// Result of one reseed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReseedOutcome {
    /// Seed for the next cipher
    pub seed: Seed,
    /// Bytes fed into the accumulator before the match
    pub bytes_scanned: u64,
}

/// Runs reseed rounds against a fixed pattern
#[derive(Debug)]
pub struct PatternReseeder<'a> {
    pattern: &'a Pattern,
}

impl<'a> PatternReseeder<'a> {
    /// Create a reseeder searching for `pattern`
    #[must_use]
    pub fn new(pattern: &'a Pattern) -> Self {
        Self { pattern }
    }

    /// Run one round against `cipher` and return the next seed
    ///
    /// Leaves `cipher` positioned right after the leading bytes.
    ///
    /// # Errors
    ///
    /// Returns `KeystreamExhausted` if the cipher runs out before a match.
    pub fn reseed(&self, cipher: &mut KeystreamCipher) -> Result<ReseedOutcome> {
        let target = self.pattern.as_bytes();
        let last = target.len() - 1;

        let mut accumulator = Sha256::new();
        let mut window = Zeroizing::new(cipher.produce(target.len())?);
        let mut bytes_scanned: u64 = 0;

        while !bool::from(window.as_slice().ct_eq(target)) {
            accumulator.update([window[0]]);
            window.copy_within(1.., 0);
            window[last] = cipher.next_byte()?;
            bytes_scanned += 1;
        }

        let digest = accumulator.finalize();
        let mut leading = Zeroizing::new([0u8; LEADING_BYTES]);
        cipher.fill(&mut leading[..])?;

        let mut mixer = Sha256::new();
        mixer.update(digest);
        mixer.update(&leading[..]);
        let mut next = Zeroizing::new([0u8; SEED_LEN]);
        next.copy_from_slice(&mixer.finalize());

        Ok(ReseedOutcome {
            seed: Seed::from_bytes(*next),
            bytes_scanned,
        })
    }
}
