//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror.
//!
//! Ordinary misuse never errors: looking up an absent key returns `None`,
//! removing an absent key is a silent no-op. The only fallible surface is
//! configuration.

use thiserror::Error;

// == Config Error Enum ==
/// Invalid cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be strictly positive
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
