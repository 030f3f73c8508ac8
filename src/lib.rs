//! Memo Cache - bounded in-memory caching and memoization
//!
//! Provides an LRU cache with TTL expiration behind a blocking handle
//! ([`SyncCache`]) or an async one ([`AsyncCache`]), plus wrappers that
//! memoize plain and async functions through them.

pub mod cache;
pub mod config;
pub mod error;
pub mod memoize;
pub mod shared;
pub mod tasks;

pub use cache::{AsyncCache, CacheStats, SyncCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use memoize::{
    memoize, memoize_async, memoize_async_fallible, memoize_fallible, AsyncMemoized, CacheKey,
    Memoized,
};
pub use shared::default_cache;
pub use tasks::spawn_purge_task;
