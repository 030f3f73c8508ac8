//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and memoization.
///
/// Lookups never fail: a missing or expired key is a miss, and eviction is
/// silent. Errors only come from bad configuration or from arguments that
/// cannot be turned into a cache key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or TTL rejected at construction
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// Call arguments could not be encoded into a cache key
    #[error("Cannot derive cache key: {0}")]
    KeyDerivation(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::KeyDerivation(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
