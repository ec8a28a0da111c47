//! Common infrastructure shared by the chainseed crates
//!
//! This crate provides:
//! - `env_logger` initialisation for binaries and tests
//! - Log-safe fingerprints for inputs that must never be logged verbatim

#![forbid(unsafe_code)]

pub mod logging;

pub use logging::LoggingTransformer;
