//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Counters ==
/// Cumulative counters owned by a cache handle.
///
/// Always updated under the same lock as the operation being counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            size,
            capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate: hit_rate(self.hits, self.misses),
            evictions: self.evictions,
            expirations: self.expirations,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of a cache's size and counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
    /// Number of live entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
}

impl CacheStats {
    /// Total number of lookups recorded.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }
}

// == Hit Rate ==
/// Calculates the cache hit rate.
///
/// Returns hits / (hits + misses), or 0.0 if no requests have been made.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let stats = Counters::default().snapshot(0, 8);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.capacity, 8);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(hit_rate(0, 0), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut counters = Counters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.snapshot(1, 1).hit_rate, 1.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut counters = Counters::default();
        counters.record_miss();
        counters.record_miss();
        assert_eq!(counters.snapshot(0, 1).hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        assert_eq!(hit_rate(3, 1), 0.75);
        assert_eq!(hit_rate(1, 1), 0.5);
    }

    #[test]
    fn test_record_evictions_and_expirations() {
        let mut counters = Counters::default();
        counters.record_eviction();
        counters.record_eviction();
        counters.record_expirations(3);

        let stats = counters.snapshot(0, 4);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.expirations, 3);
    }

    #[test]
    fn test_stats_serialize() {
        let mut counters = Counters::default();
        counters.record_hit();
        counters.record_miss();

        let json = serde_json::to_value(counters.snapshot(1, 2)).unwrap();
        assert_eq!(json["size"], 1);
        assert_eq!(json["capacity"], 2);
        assert_eq!(json["hit_rate"], 0.5);
    }
}
