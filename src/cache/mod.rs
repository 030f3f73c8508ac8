//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration and LRU eviction, behind
//! either a blocking or an async lock.

mod async_cache;
mod entry;
mod expiry;
mod lru;
mod state;
mod stats;
mod store;
mod sync;


// Re-export public types
pub use async_cache::AsyncCache;
pub use entry::CacheEntry;
pub use expiry::ExpiryIndex;
pub use lru::LruTracker;
pub use stats::{hit_rate, CacheStats};
pub use store::{EvictionCore, Lookup, PutOutcome};
pub use sync::SyncCache;
