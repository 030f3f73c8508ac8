//! Async Cache Handle
//!
//! Wraps the eviction core in a `tokio::sync::Mutex`. Tasks waiting for the
//! lock suspend instead of blocking a worker thread, and are granted it in
//! the order they asked.

use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::state::CacheState;
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::Result;

// == Async Cache ==
/// Async-safe LRU cache with TTL support.
///
/// The only suspension point of each operation is acquiring the lock. The
/// critical section never awaits, so a cancelled caller either never got the
/// lock or already finished its mutation.
#[derive(Debug)]
pub struct AsyncCache<K, V> {
    state: Mutex<CacheState<K, V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> AsyncCache<K, V> {
    /// Creates an empty cache, rejecting invalid configs.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self {
            state: Mutex::new(CacheState::new(config)?),
        })
    }

    /// Returns a clone of the cached value, recording a hit or a miss.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.state.lock().await.get(key)
    }

    /// Stores a value, evicting as needed.
    pub async fn put(&self, key: K, value: V) {
        self.state.lock().await.put(key, value)
    }

    /// Stores a value that expires after `ttl`, overriding the cache's TTL.
    pub async fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.state.lock().await.put_with_ttl(key, value, ttl)
    }

    /// Removes an entry. Returns whether anything was removed.
    pub async fn remove(&self, key: &K) -> bool {
        self.state.lock().await.remove(key)
    }

    /// Drops every entry and resets hit/miss statistics.
    pub async fn clear(&self) {
        self.state.lock().await.clear()
    }

    /// Removes expired entries, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.state.lock().await.purge_expired()
    }

    pub async fn contains_key(&self, key: &K) -> bool {
        self.state.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats()
    }
}

impl<K: Hash + Eq + Clone, V> Default for AsyncCache<K, V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::CacheError;

    #[tokio::test]
    async fn test_async_cache_invalid_config() {
        let result = AsyncCache::<String, i32>::new(CacheConfig::new(0));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_async_cache_default() {
        let cache: AsyncCache<u32, u32> = AsyncCache::default();
        assert_eq!(cache.stats().await.capacity, 128);
    }

    #[tokio::test]
    async fn test_async_cache_concrete_scenario() {
        let cache = AsyncCache::new(CacheConfig::new(2)).unwrap();

        cache.put("a", 1).await;
        cache.put("b", 2).await;
        assert_eq!(cache.get(&"a").await, Some(1));
        cache.put("c", 3).await;
        assert_eq!(cache.get(&"b").await, None);
        assert_eq!(cache.get(&"a").await, Some(1));
        assert_eq!(cache.get(&"c").await, Some(3));

        let stats = cache.stats().await;
        assert_eq!(stats.size, 2);
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 0.75);
    }

    #[tokio::test]
    async fn test_async_cache_remove_and_clear() {
        let cache = AsyncCache::new(CacheConfig::new(4)).unwrap();
        cache.put(1, "one").await;
        cache.put(2, "two").await;
        cache.get(&1).await;

        assert!(cache.remove(&1).await);
        assert!(!cache.remove(&1).await);
        assert!(cache.contains_key(&2).await);

        cache.clear().await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.hits, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_cache_ttl_law() {
        let config = CacheConfig::new(4).with_ttl(Duration::from_secs(10));
        let cache = AsyncCache::new(config).unwrap();

        cache.put("k", 1).await;
        cache.put("j", 2).await;
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(cache.get(&"k").await, Some(1));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get(&"k").await, None);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.purge_expired().await, 1);

        let stats = cache.stats().await;
        assert_eq!(stats.expirations, 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_cache_put_with_ttl() {
        let config = CacheConfig::new(4).with_ttl(Duration::from_secs(10));
        let cache = AsyncCache::new(config).unwrap();

        cache.put_with_ttl("pinned", 1, Duration::from_secs(60)).await;
        cache.put("regular", 2).await;
        tokio::time::advance(Duration::from_secs(11)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.get(&"pinned").await, Some(1));

        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(cache.get(&"pinned").await, None);
        assert_eq!(cache.stats().await.expirations, 2);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_leaves_lock_usable() {
        let cache = Arc::new(AsyncCache::new(CacheConfig::new(4)).unwrap());
        cache.put("k", 1).await;

        let guard = cache.state.lock().await;
        let waiting = tokio::time::timeout(Duration::from_millis(20), cache.get(&"k")).await;
        assert!(waiting.is_err(), "get should still be waiting for the lock");
        drop(guard);

        assert_eq!(cache.get(&"k").await, Some(1));
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1, "cancelled get must not be counted");
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_waiters_acquire_in_request_order() {
        let cache = Arc::new(AsyncCache::new(CacheConfig::new(8)).unwrap());
        let guard = cache.state.lock().await;

        let mut handles = Vec::new();
        for i in 0..5 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.put("last", i).await }));
            // let each task reach the lock queue before spawning the next
            tokio::task::yield_now().await;
        }
        drop(guard);

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(cache.get(&"last").await, Some(4));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_async_cache_concurrent_tasks() {
        let cache = Arc::new(AsyncCache::new(CacheConfig::new(10)).unwrap());

        let handles: Vec<_> = (0..50u64)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    let key = i % 15;
                    if cache.get(&key).await.is_none() {
                        cache.put(key, key * 2).await;
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let stats = cache.stats().await;
        assert_eq!(stats.requests(), 50);
        assert!(stats.size <= 10);
    }
}
