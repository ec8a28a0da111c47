//! ChaCha20 keystream source
//!
//! Raw keystream bytes are the cipher applied to an all-zero buffer. The cipher
//! is keyed by a [`Seed`] with a 12-byte all-zero nonce, so the stream is fully
//! determined by the seed. Keystream is generated ahead into an owned buffer;
//! callers see the same bytes however their draws are split.
//!
//! The 32-bit block counter bounds one seed to just under 256 GiB. Draws past
//! that point fail with `KeystreamExhausted` instead of wrapping.

use crate::error::{GeneratorError, Result};
use crate::seed::Seed;
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

/// ChaCha20 nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// Size of the read-ahead buffer (64 ChaCha20 blocks)
pub const BUFFER_LEN: usize = 4096;

const ZERO_NONCE: [u8; NONCE_LEN] = [0u8; NONCE_LEN];

/// Keystream cipher keyed by one seed
///
/// Re-keying is done by constructing a new value; the old cipher and its
/// buffered keystream are zeroized when dropped.
pub struct KeystreamCipher {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    cursor: usize,
    position: u64,
}

impl KeystreamCipher {
    /// Key a fresh cipher at stream position zero
    #[must_use]
    pub fn new(seed: &Seed) -> Self {
        // Both lengths are compile-time constants; from_slice cannot panic here.
        let key = chacha20::Key::from_slice(seed.as_bytes());
        let nonce = chacha20::Nonce::from_slice(&ZERO_NONCE);
        Self {
            cipher: ChaCha20::new(key, nonce),
            buffer: Zeroizing::new(vec![0u8; BUFFER_LEN]),
            cursor: BUFFER_LEN,
            position: 0,
        }
    }

    /// Fill `out` with the next keystream bytes
    ///
    /// # Errors
    ///
    /// Returns `KeystreamExhausted` once the ChaCha20 block counter would
    /// overflow. Bytes copied before that point stay in `out` and are counted
    /// by [`KeystreamCipher::position`].
    pub fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        let mut written = 0;
        while written < out.len() {
            if self.cursor == BUFFER_LEN {
                self.refill()?;
            }
            let take = (out.len() - written).min(BUFFER_LEN - self.cursor);
            out[written..written + take]
                .copy_from_slice(&self.buffer[self.cursor..self.cursor + take]);
            self.cursor += take;
            self.position += take as u64;
            written += take;
        }
        Ok(())
    }

    /// Return the next `n` keystream bytes
    ///
    /// # Errors
    ///
    /// Returns `KeystreamExhausted` at the end of the keystream.
    pub fn produce(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// Return the next keystream byte
    ///
    /// # Errors
    ///
    /// Returns `KeystreamExhausted` at the end of the keystream.
    pub fn next_byte(&mut self) -> Result<u8> {
        if self.cursor == BUFFER_LEN {
            self.refill()?;
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        self.position += 1;
        Ok(byte)
    }

    /// Number of keystream bytes handed out since keying
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    fn refill(&mut self) -> Result<()> {
        self.buffer.fill(0);
        self.cipher
            .try_apply_keystream(&mut self.buffer)
            .map_err(|_| GeneratorError::KeystreamExhausted {
                position: self.position,
            })?;
        self.cursor = 0;
        Ok(())
    }

    /// Move the underlying cipher to `byte_pos`, dropping buffered keystream
    #[cfg(test)]
    pub(crate) fn seek_to(&mut self, byte_pos: u64) {
        use chacha20::cipher::StreamCipherSeek;
        self.cipher.seek(byte_pos);
        self.cursor = BUFFER_LEN;
    }
}

impl core::fmt::Debug for KeystreamCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeystreamCipher")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
