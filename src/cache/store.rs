//! Eviction Core Module
//!
//! Capacity- and TTL-bounded storage combining a HashMap with LRU tracking
//! and a deadline index for expiry. Pure policy: no locking, no statistics. The sync and async handles wrap it.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, ExpiryIndex, LruTracker};
use crate::config::CacheConfig;
use crate::error::Result;

// == Lookup ==
/// Result of reading a key from an [`EvictionCore`].
#[derive(Debug)]
pub enum Lookup<'a, V> {
    /// Live entry, already moved to most recently used
    Hit(&'a CacheEntry<V>),
    /// Key not present
    Miss,
    /// Key was present but expired; it has been removed
    Expired,
}

impl<'a, V> Lookup<'a, V> {
    /// The entry on a hit.
    pub fn entry(self) -> Option<&'a CacheEntry<V>> {
        match self {
            Lookup::Hit(entry) => Some(entry),
            Lookup::Miss | Lookup::Expired => None,
        }
    }
}

// == Put Outcome ==
/// What a `put` displaced to make room.
#[derive(Debug)]
pub struct PutOutcome<K, V> {
    /// Expired entries reclaimed before the insert
    pub expired: usize,
    /// Live least-recently-used entry evicted for capacity
    pub evicted: Option<(K, V)>,
}

impl<K, V> PutOutcome<K, V> {
    fn untouched() -> Self {
        Self {
            expired: 0,
            evicted: None,
        }
    }
}

// == Eviction Core ==
/// Bounded recency-ordered map with optional expiry.
///
/// Invariants:
/// - every key in the LRU tracker has exactly one entry in the map and vice versa
/// - the expiry index holds exactly the keys whose entry has a deadline
/// - `len() <= capacity()` after every operation
#[derive(Debug)]
pub struct EvictionCore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Deadlines of entries that can expire
    expiry: ExpiryIndex<K>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age
    ttl: Option<Duration>,
}

impl<K: Hash + Eq + Clone, V> EvictionCore<K, V> {
    // == Constructor ==
    /// Creates an empty core, rejecting invalid configs.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.capacity.min(1024)),
            lru: LruTracker::new(),
            expiry: ExpiryIndex::new(),
            capacity: config.capacity,
            ttl: config.ttl,
        }
    }

    // == Get ==
    /// Looks up a key.
    ///
    /// A live entry becomes most recently used and has its access
    /// bookkeeping updated. An expired entry is removed on discovery.
    pub fn get(&mut self, key: &K) -> Lookup<'_, V> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            None => return Lookup::Miss,
            Some(entry) => entry.is_expired_at(self.ttl, now),
        };

        if expired {
            self.remove(key);
            return Lookup::Expired;
        }

        self.lru.touch(key);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(now);
                Lookup::Hit(entry)
            }
            None => Lookup::Miss,
        }
    }

    // == Put ==
    /// Stores a value as a fresh entry.
    ///
    /// Overwriting restarts the entry's age and recency. Inserting a new key
    /// into a full core first reclaims expired entries, and only evicts the
    /// least recently used live entry if that freed nothing.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        self.insert(key, CacheEntry::new(value))
    }

    /// Like [`put`](Self::put), but the entry expires after `ttl` whatever
    /// the cache-wide TTL says.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Duration) -> PutOutcome<K, V> {
        self.insert(key, CacheEntry::new(value).with_ttl(ttl))
    }

    fn insert(&mut self, key: K, entry: CacheEntry<V>) -> PutOutcome<K, V> {
        let mut outcome = PutOutcome::untouched();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            outcome.expired = self.purge_expired();

            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.lru.evict_oldest() {
                    self.expiry.remove(&oldest);
                    if let Some(entry) = self.entries.remove(&oldest) {
                        outcome.evicted = Some((oldest, entry.value));
                    }
                }
            }
        }

        self.lru.touch(&key);
        match entry.expires_at(self.ttl) {
            Some(deadline) => self.expiry.schedule(&key, deadline),
            None => {
                self.expiry.remove(&key);
            }
        }
        self.entries.insert(key, entry);
        outcome
    }

    // == Remove ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.expiry.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.expiry.clear();
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Walks the expiry index from the earliest deadline and stops at the
    /// first live one, so live entries are never visited.
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        while let Some(key) = self.expiry.pop_expired(now) {
            self.entries.remove(&key);
            self.lru.remove(&key);
            removed += 1;
        }

        removed
    }

    /// Earliest instant at which some entry will expire.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.expiry.next_deadline()
    }

    /// Reads an entry without touching recency or expiring it.
    pub fn peek(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.lru.iter()
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

/// An empty core with the default config (capacity 128, no TTL).
impl<K: Hash + Eq + Clone, V> Default for EvictionCore<K, V> {
    fn default() -> Self {
        Self::from_valid(CacheConfig::default())
    }
}
