//! Expiry Index Module
//!
//! Orders entries by deadline so expired ones are found without a scan.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use tokio::time::Instant;

/// Position of a key in the index: its deadline plus a sequence number that
/// keeps equal deadlines distinct.
type Slot = (Instant, u64);

// == Expiry Index ==
/// Tracks the expiry deadline of every entry that has one.
///
/// - Earliest deadline = first to expire
/// - Keys without a deadline are never tracked
///
/// Equal deadlines come out in scheduling order.
#[derive(Debug)]
pub struct ExpiryIndex<K> {
    /// Keys ordered by deadline
    order: BTreeMap<Slot, K>,
    /// Current slot of each tracked key
    slots: HashMap<K, Slot>,
    next_seq: u64,
}

impl<K> Default for ExpiryIndex<K> {
    fn default() -> Self {
        Self {
            order: BTreeMap::new(),
            slots: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Hash + Eq + Clone> ExpiryIndex<K> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Schedule ==
    /// Sets the deadline of a key, replacing any previous one.
    pub fn schedule(&mut self, key: &K, deadline: Instant) {
        let slot = (deadline, self.next_seq);
        self.next_seq += 1;

        match self.slots.get_mut(key) {
            Some(current) => {
                let previous = std::mem::replace(current, slot);
                let key = self.order.remove(&previous).unwrap_or_else(|| key.clone());
                self.order.insert(slot, key);
            }
            None => {
                self.slots.insert(key.clone(), slot);
                self.order.insert(slot, key.clone());
            }
        }
    }

    // == Remove ==
    /// Stops tracking a key. Returns whether it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(slot) => {
                self.order.remove(&slot);
                true
            }
            None => false,
        }
    }

    // == Pop Expired ==
    /// Returns and removes the key with the earliest deadline if that
    /// deadline lies strictly before `now`.
    pub fn pop_expired(&mut self, now: Instant) -> Option<K> {
        let (&(deadline, _), _) = self.order.first_key_value()?;
        if deadline >= now {
            return None;
        }
        let (_, key) = self.order.pop_first()?;
        self.slots.remove(&key);
        Some(key)
    }

    /// Earliest deadline currently tracked.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.order.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.order.clear();
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }
}
