//! TTL Purge Task
//!
//! Background task that periodically removes expired entries from an
//! [`AsyncCache`], so expired values don't sit in memory until their key is
//! read again or the cache fills up.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::AsyncCache;

/// Spawns a task that calls `purge_expired` on `cache` every `interval`.
///
/// The task runs until aborted through the returned handle. Each pass holds
/// the cache lock only for the scan itself.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(AsyncCache::new(config)?);
/// let purge_handle = spawn_purge_task(Arc::clone(&cache), Duration::from_secs(1));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<K, V>(cache: Arc<AsyncCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting TTL purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!("TTL purge: removed {} expired entries", removed);
            } else {
                debug!("TTL purge: no expired entries found");
            }
        }
    })
}
