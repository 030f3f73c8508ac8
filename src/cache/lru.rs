//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh, strictly increasing tick:
/// - Smallest tick = least recently used
/// - Largest tick = most recently used
///
/// Ticks never repeat, so two keys can't tie on recency and the earliest
/// inserted of any untouched keys is always evicted first.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Keys ordered by tick
    order: BTreeMap<u64, K>,
    /// Current tick of each tracked key
    ticks: HashMap<K, u64>,
    next_tick: u64,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: BTreeMap::new(),
            ticks: HashMap::new(),
            next_tick: 0,
        }
    }
}

impl<K: Hash + Eq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, adding it if untracked.
    pub fn touch(&mut self, key: &K) {
        let tick = self.next_tick;
        self.next_tick += 1;

        match self.ticks.get_mut(key) {
            Some(current) => {
                let previous = std::mem::replace(current, tick);
                let key = self.order.remove(&previous).unwrap_or_else(|| key.clone());
                self.order.insert(tick, key);
            }
            None => {
                self.ticks.insert(key.clone(), tick);
                self.order.insert(tick, key.clone());
            }
        }
    }

    // == Remove ==
    /// Stops tracking a key. Returns whether it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.ticks.remove(key) {
            Some(tick) => {
                self.order.remove(&tick);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.values().next()
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.values()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.order.clear();
        self.ticks.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.ticks.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(keys: &[&'static str]) -> LruTracker<&'static str> {
        let mut lru = LruTracker::new();
        for key in keys {
            lru.touch(key);
        }
        lru
    }

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<String> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_touch_new_key() {
        let lru = tracker_with(&["key1", "key2", "key3"]);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&"key1"));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        lru.touch(&"key1");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&"key2"));
        assert_eq!(lru.iter().copied().collect::<Vec<_>>(), ["key2", "key3", "key1"]);
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        assert_eq!(lru.evict_oldest(), Some("key1"));
        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"key1"));

        assert_eq!(lru.evict_oldest(), Some("key2"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru: LruTracker<u32> = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        assert!(lru.remove(&"key2"));
        assert!(!lru.remove(&"nonexistent"));

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"key2"));
        assert!(lru.contains(&"key1"));
        assert!(lru.contains(&"key3"));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        lru.touch(&"a");
        lru.touch(&"c");
        lru.touch(&"b");

        assert_eq!(lru.evict_oldest(), Some("a"));
        assert_eq!(lru.evict_oldest(), Some("c"));
        assert_eq!(lru.evict_oldest(), Some("b"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = tracker_with(&["key1", "key1", "key1"]);

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some("key1"));
        assert!(lru.is_empty());
        lru.touch(&"key1");
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = tracker_with(&["a", "b"]);
        lru.clear();

        assert!(lru.is_empty());
        assert!(!lru.contains(&"a"));
    }
}
