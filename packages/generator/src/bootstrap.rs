//! Memory-hard bootstrap of the initial seed
//!
//! The password is stretched with Argon2 (version 0x13, one lane). The salt is
//! derived deterministically from the confusion string and the iteration count,
//! so changing either one changes the bootstrap seed.

use crate::config::KdfConfig;
use crate::error::{GeneratorError, Result};
use crate::seed::{SEED_LEN, Seed};
use argon2::{Argon2, Params, Version};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Argon2 lanes
pub const PARALLELISM: u32 = 1;

/// First 16 bytes of SHA-256(confusion || little-endian u32(iteration count))
#[must_use]
pub fn derive_salt(confusion: &[u8], iteration_count: u32) -> [u8; SALT_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(confusion);
    hasher.update(iteration_count.to_le_bytes());
    let digest = hasher.finalize();

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&digest[..SALT_LEN]);
    salt
}

/// Derive the bootstrap seed from the password
///
/// # Errors
///
/// Returns `InvalidKdfConfig` if `config` fails validation and `KeyDerivation`
/// if Argon2 rejects its parameters or fails.
pub fn bootstrap_seed(
    password: &[u8],
    confusion: &[u8],
    iteration_count: u32,
    config: &KdfConfig,
) -> Result<Seed> {
    config.validate()?;

    let time_cost = config.time_cost.time_cost(iteration_count);
    let params = Params::new(config.memory_cost, time_cost, PARALLELISM, Some(SEED_LEN))
        .map_err(|e| GeneratorError::key_derivation(format!("Invalid Argon2 parameters: {e}")))?;
    let argon2 = Argon2::new(config.variant.algorithm(), Version::V0x13, params);

    let salt = derive_salt(confusion, iteration_count);
    let mut output = Zeroizing::new([0u8; SEED_LEN]);
    argon2
        .hash_password_into(password, &salt, &mut output[..])
        .map_err(|e| GeneratorError::key_derivation(format!("Argon2 key derivation failed: {e}")))?;

    tracing::debug!(
        variant = ?config.variant,
        memory_kib = config.memory_cost,
        time_cost,
        "bootstrap seed derived"
    );

    Ok(Seed::from_bytes(*output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KdfVariant, TimeCostPolicy};
    use hex_literal::hex;

    #[test]
    fn test_salt_vector() {
        let salt = derive_salt(b"battery staple", 1);
        assert_eq!(salt, hex!("85213b0e4c05152315eaad92a685d68c"));
    }

    #[test]
    fn test_salt_depends_on_iteration_count() {
        assert_ne!(derive_salt(b"CS", 50), derive_salt(b"CS", 51));
        assert_ne!(derive_salt(b"CS", 0), derive_salt(b"CS", 1 << 16));
    }

    #[test]
    fn test_bootstrap_is_deterministic() {
        let config = KdfConfig::lightweight();
        let a = bootstrap_seed(b"pw", b"cs", 3, &config).expect("bootstrap should succeed");
        let b = bootstrap_seed(b"pw", b"cs", 3, &config).expect("bootstrap should succeed");
        assert_eq!(a, b);
    }

    #[test]
    fn test_bootstrap_depends_on_kdf_config() {
        let base = KdfConfig::lightweight();
        let argon2id = KdfConfig {
            variant: KdfVariant::Argon2id,
            ..base
        };
        let more_passes = KdfConfig {
            time_cost: TimeCostPolicy::Fixed(4),
            ..base
        };
        let more_memory = KdfConfig {
            memory_cost: 2048,
            ..base
        };

        let reference = bootstrap_seed(b"pw", b"cs", 1, &base).expect("bootstrap should succeed");
        for config in [argon2id, more_passes, more_memory] {
            let seed = bootstrap_seed(b"pw", b"cs", 1, &config).expect("bootstrap should succeed");
            assert_ne!(seed, reference, "{config:?}");
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_hashing() {
        let config = KdfConfig {
            memory_cost: 1,
            ..KdfConfig::lightweight()
        };
        let err = bootstrap_seed(b"pw", b"cs", 1, &config).expect_err("must be rejected");
        assert!(err.is_input_validation());
    }
}
