//! Seed key material

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed length in bytes (one ChaCha20 key)
pub const SEED_LEN: usize = 32;

/// 32 bytes of key material keying the keystream for one phase of generation
///
/// Zeroized on drop. Equality is constant time and `Debug` never prints the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap existing key material
    #[must_use]
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Seed {}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Seed(REDACTED)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let seed = Seed::from_bytes([0xAB; SEED_LEN]);
        let printed = format!("{seed:?}");
        assert_eq!(printed, "Seed(REDACTED)");
        assert!(!printed.contains("171"));
    }

    #[test]
    fn test_equality_compares_every_byte() {
        let a = Seed::from_bytes([7; SEED_LEN]);
        let mut last_differs = [7; SEED_LEN];
        last_differs[SEED_LEN - 1] = 8;

        assert_eq!(a, Seed::from_bytes([7; SEED_LEN]));
        assert_ne!(a, Seed::from_bytes(last_differs));
    }

    #[test]
    fn test_zeroize_clears_bytes() {
        let mut seed = Seed::from_bytes([0x5A; SEED_LEN]);
        seed.zeroize();
        assert_eq!(seed.as_bytes(), &[0u8; SEED_LEN]);
    }
}
