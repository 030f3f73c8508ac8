//! Configuration Module
//!
//! Capacity and TTL settings for a cache, either built in code or loaded from
//! environment variables.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default capacity when none is configured.
pub const DEFAULT_CAPACITY: usize = 128;

/// Cache construction parameters.
///
/// Both values are fixed for the lifetime of the cache built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub capacity: usize,
    /// Maximum entry age, None = entries never expire
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Creates a config with the given capacity and no TTL.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ttl: None,
        }
    }

    /// Sets the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the time-to-live from fractional seconds.
    ///
    /// Negative, NaN and infinite values are rejected.
    pub fn with_ttl_secs(self, secs: f64) -> Result<Self> {
        let ttl = Duration::try_from_secs_f64(secs)
            .map_err(|e| CacheError::InvalidConfig(format!("ttl of {secs}s: {e}")))?;
        Ok(self.with_ttl(ttl))
    }

    /// Checks the config can back a cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum entries (default: 128)
    /// - `CACHE_TTL_SECS` - TTL in seconds, fractions allowed (default: none)
    ///
    /// Unset variables fall back to defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup("CACHE_CAPACITY") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CacheError::InvalidConfig(format!(
                    "CACHE_CAPACITY is not a positive integer: {raw:?}"
                ))
            })?,
            None => DEFAULT_CAPACITY,
        };

        let mut config = Self::new(capacity);
        if let Some(raw) = lookup("CACHE_TTL_SECS") {
            let secs = raw.trim().parse::<f64>().map_err(|_| {
                CacheError::InvalidConfig(format!("CACHE_TTL_SECS is not a number: {raw:?}"))
            })?;
            config = config.with_ttl_secs(secs)?;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
