//! Guarded Cache State
//!
//! The data both handles keep behind their lock: the eviction core plus the
//! handle's counters, so a lookup and its statistics change together.

use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::stats::Counters;
use crate::cache::{CacheStats, EvictionCore, Lookup, PutOutcome};
use crate::config::CacheConfig;
use crate::error::Result;

#[derive(Debug)]
pub(crate) struct CacheState<K, V> {
    core: EvictionCore<K, V>,
    counters: Counters,
}

impl<K: Hash + Eq + Clone, V> Default for CacheState<K, V> {
    fn default() -> Self {
        Self {
            core: EvictionCore::default(),
            counters: Counters::default(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> CacheState<K, V> {
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self {
            core: EvictionCore::new(config)?,
            counters: Counters::default(),
        })
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.core.get(key) {
            Lookup::Hit(entry) => {
                self.counters.record_hit();
                Some(entry.value.clone())
            }
            Lookup::Expired => {
                self.counters.record_miss();
                self.counters.record_expirations(1);
                None
            }
            Lookup::Miss => {
                self.counters.record_miss();
                None
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        let outcome = self.core.put(key, value);
        self.record_put(outcome);
    }

    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        let outcome = self.core.put_with_ttl(key, value, ttl);
        self.record_put(outcome);
    }

    fn record_put(&mut self, outcome: PutOutcome<K, V>) {
        if outcome.expired > 0 {
            self.counters.record_expirations(outcome.expired);
            debug!(
                expired = outcome.expired,
                "Reclaimed expired entries to make room"
            );
        }
        if outcome.evicted.is_some() {
            self.counters.record_eviction();
            debug!(capacity = self.core.capacity(), "Evicted least recently used entry");
        }
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.core.remove(key)
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.core.clear();
        self.counters = Counters::default();
    }

    pub fn purge_expired(&mut self) -> usize {
        let removed = self.core.purge_expired();
        self.counters.record_expirations(removed);
        removed
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.core.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.core.len(), self.core.capacity())
    }
}
