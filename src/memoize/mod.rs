//! Memoize Module
//!
//! Function wrappers that consult a cache before recomputing.
//!
//! # Example
//! ```
//! use memo_cache::{memoize, CacheConfig};
//!
//! let square = memoize(CacheConfig::new(64), |x: u64| x * x).unwrap();
//! assert_eq!(square.call(12).unwrap(), 144);
//! assert_eq!(square.call(12).unwrap(), 144);
//! assert_eq!(square.cache_stats().hits, 1);
//! ```

mod async_memo;
mod key;
mod memo;

pub use async_memo::{memoize_async, memoize_async_fallible, AsyncMemoized};
pub use key::CacheKey;
pub use memo::{memoize, memoize_fallible, Memoized};
