//! Structured logging infrastructure
//!
//! Provides env_logger-based logging for the chainseed binaries. Libraries in the
//! workspace emit `tracing` events; the `log` bridge routes them here when no
//! tracing subscriber is installed.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Length of the hex fingerprint emitted by [`LoggingTransformer::fingerprint`]
pub const FINGERPRINT_HEX_LEN: usize = 12;

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (call once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - per-round reseed statistics
    /// - `RUST_LOG=info` - setup summary (recommended)
    /// - `RUST_LOG=chainseed_generator=trace` - module-specific levels
    ///
    /// Without `RUST_LOG` only warnings and errors are printed, so the raw
    /// byte stream on stdout is never interleaved with diagnostics.
    pub fn init() {
        Self::init_with_default("warn");
    }

    /// Initialize logging with a fallback filter used when `RUST_LOG` is unset
    ///
    /// Only the first initialization in a process takes effect.
    pub fn init_with_default(default_filter: &str) {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
                .format_timestamp_micros()
                .target(env_logger::Target::Stderr)
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log-safe fingerprint of sensitive input
    ///
    /// Returns `#` followed by the first 12 hex characters of SHA-256(input).
    /// Enough to correlate runs, useless for recovering the input.
    #[must_use]
    pub fn fingerprint(input: &[u8]) -> String {
        let digest = Sha256::digest(input);
        let hex_digest = hex::encode(digest);
        format!("#{}", &hex_digest[..FINGERPRINT_HEX_LEN])
    }

    /// Log performance metrics and timing information
    pub fn log_performance_metric(operation: &str, duration: Duration, success: bool) {
        let duration_ms = duration.as_millis();
        if success {
            info!("Performance: {operation} completed in {duration_ms}ms");
        } else {
            warn!("Performance: {operation} failed after {duration_ms}ms");
        }
    }

    /// Log cryptographic failures without exposing their inputs
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        log::error!("Cryptographic operation failed: {operation} ({error})");
    }
}
