//! Configuration Module
//!
//! Cache construction parameters, with optional loading from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default capacity when none is configured.
pub const DEFAULT_CAPACITY: usize = 256;

/// Cache configuration, fixed at construction.
///
/// A zero duration disables the corresponding axis: `max_age` of zero means
/// entries never expire, `cleanup_time` of zero means no idle auto-cleanup.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (must be > 0)
    pub capacity: usize,
    /// Cache-wide maximum idle age before an entry expires
    pub max_age: Duration,
    /// Idle window after which the whole cache is auto-cleared
    pub cleanup_time: Duration,
}

impl CacheConfig {
    /// Creates a validated configuration.
    pub fn new(capacity: usize, max_age: Duration, cleanup_time: Duration) -> Result<Self> {
        let config = Self {
            capacity,
            max_age,
            cleanup_time,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with the given capacity and no expiration.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, Duration::ZERO, Duration::ZERO)
    }

    /// Creates a CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 256)
    /// - `CACHE_MAX_AGE_MS` - Entry expiration in milliseconds (default: 0 = disabled)
    /// - `CACHE_CLEANUP_MS` - Idle auto-clear window in milliseconds (default: 0 = disabled)
    pub fn from_env() -> Result<Self> {
        let capacity = env::var("CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CAPACITY);
        let max_age_ms: u64 = env::var("CACHE_MAX_AGE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let cleanup_ms: u64 = env::var("CACHE_CLEANUP_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self::new(
            capacity,
            Duration::from_millis(max_age_ms),
            Duration::from_millis(cleanup_ms),
        )
    }

    /// Fails fast on an invalid configuration instead of clamping it.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_age: Duration::ZERO,
            cleanup_time: Duration::ZERO,
        }
    }
}
