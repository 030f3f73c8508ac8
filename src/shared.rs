//! Shared Default Cache
//!
//! An optional process-wide cache for callers that don't want to own one.
//! Built on first use from `CACHE_CAPACITY` / `CACHE_TTL_SECS`; lives until
//! process exit. Nothing in the crate depends on it.

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::SyncCache;
use crate::config::CacheConfig;
use crate::error::Result;

static DEFAULT_CACHE: Lazy<SyncCache<String, Value>> =
    Lazy::new(|| build_shared_cache(CacheConfig::from_env()));

fn build_shared_cache(config: Result<CacheConfig>) -> SyncCache<String, Value> {
    let cache = config.and_then(|config| {
        info!(
            capacity = config.capacity,
            ttl = ?config.ttl,
            "Initializing shared default cache"
        );
        SyncCache::new(config)
    });

    cache.unwrap_or_else(|err| {
        warn!("{err}; using the default cache configuration");
        SyncCache::default()
    })
}

/// Returns the process-wide cache, creating it on first call.
pub fn default_cache() -> &'static SyncCache<String, Value> {
    &DEFAULT_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::error::CacheError;

    #[test]
    fn test_default_cache_is_shared() {
        let key = "shared::tests::answer".to_string();
        default_cache().put(key.clone(), json!({"answer": 42}));

        let from_elsewhere = std::thread::spawn({
            let key = key.clone();
            move || default_cache().get(&key)
        })
        .join()
        .unwrap();

        assert_eq!(from_elsewhere, Some(json!({"answer": 42})));
        assert!(default_cache().remove(&key));
        assert!(std::ptr::eq(default_cache(), default_cache()));
    }

    #[test]
    fn test_shared_cache_uses_valid_config() {
        let cache = build_shared_cache(Ok(CacheConfig::new(7)));
        assert_eq!(cache.stats().capacity, 7);
    }

    #[test]
    fn test_shared_cache_falls_back_on_bad_config() {
        let bad_env = Err(CacheError::InvalidConfig("CACHE_CAPACITY".to_string()));
        assert_eq!(build_shared_cache(bad_env).stats().capacity, 128);

        let zero = build_shared_cache(Ok(CacheConfig::new(0)));
        assert_eq!(zero.stats().capacity, 128);
    }
}
