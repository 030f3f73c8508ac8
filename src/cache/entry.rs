//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access bookkeeping.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value with its metadata.
///
/// Timestamps come from `tokio::time::Instant`, so a paused tokio clock
/// drives expiry in tests.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time, never changed after creation
    pub created_at: Instant,
    /// Time of the most recent successful read
    pub last_accessed_at: Instant,
    /// Number of successful reads
    pub hit_count: u64,
    /// Lifetime of this entry alone, overriding the cache-wide TTL
    pub ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry stamped with the current time.
    pub fn new(value: V) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            last_accessed_at: now,
            hit_count: 0,
            ttl: None,
        }
    }

    /// Gives this entry its own TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The TTL in force: the entry's own, else `default_ttl`.
    pub fn effective_ttl(&self, default_ttl: Option<Duration>) -> Option<Duration> {
        self.ttl.or(default_ttl)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its TTL at time `now`.
    ///
    /// `default_ttl` applies only when the entry has no TTL of its own.
    /// Boundary condition: an entry whose age equals the TTL is still live;
    /// it expires once the age strictly exceeds it.
    pub fn is_expired_at(&self, default_ttl: Option<Duration>, now: Instant) -> bool {
        match self.effective_ttl(default_ttl) {
            Some(ttl) => self.age_at(now) > ttl,
            None => false,
        }
    }

    /// Instant after which the entry counts as expired.
    ///
    /// None when no TTL applies or the deadline is beyond the clock's range.
    pub fn expires_at(&self, default_ttl: Option<Duration>) -> Option<Instant> {
        let ttl = self.effective_ttl(default_ttl)?;
        self.created_at.checked_add(ttl)
    }

    /// Age of the entry at time `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Record Access ==
    /// Marks a successful read.
    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_accessed_at = now;
        self.hit_count += 1;
    }
}
