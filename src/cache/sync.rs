//! Blocking Cache Handle
//!
//! Wraps the eviction core in a `parking_lot::Mutex` for callers on
//! multiple OS threads.

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::state::CacheState;
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::Result;

// == Sync Cache ==
/// Thread-safe LRU cache with TTL support.
///
/// Every operation holds the lock for its whole duration, so operations are
/// linearizable and statistics always match the entries they describe.
/// Share it across threads with `Arc<SyncCache<K, V>>`.
pub struct SyncCache<K, V> {
    state: Mutex<CacheState<K, V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> SyncCache<K, V> {
    /// Creates an empty cache, rejecting invalid configs.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self {
            state: Mutex::new(CacheState::new(config)?),
        })
    }

    /// Returns a clone of the cached value, recording a hit or a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        self.state.lock().get(key)
    }

    /// Stores a value, evicting as needed.
    pub fn put(&self, key: K, value: V) {
        self.state.lock().put(key, value)
    }

    /// Stores a value that expires after `ttl`, overriding the cache's TTL.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.state.lock().put_with_ttl(key, value, ttl)
    }

    /// Removes an entry. Returns whether anything was removed.
    pub fn remove(&self, key: &K) -> bool {
        self.state.lock().remove(key)
    }

    /// Drops every entry and resets hit/miss statistics.
    pub fn clear(&self) {
        self.state.lock().clear()
    }

    /// Removes expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.state.lock().purge_expired()
    }

    /// Checks presence without touching recency or statistics.
    pub fn contains_key(&self, key: &K) -> bool {
        self.state.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats()
    }
}

/// An empty cache with the default config (capacity 128, no TTL).
impl<K: Hash + Eq + Clone, V> Default for SyncCache<K, V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> fmt::Debug for SyncCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        write!(f, "SyncCache(size={}, capacity={})", stats.size, stats.capacity)
    }
}
