//! Async Memoizer
//!
//! Wraps a future-returning function so repeated calls with equal arguments
//! are served from an [`AsyncCache`].

use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;
use tracing::debug;

use crate::cache::{AsyncCache, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::memoize::CacheKey;

// == Async Memoized ==
/// An async function whose results are cached by argument.
///
/// A call suspends only while waiting for the cache lock and while awaiting
/// the wrapped future. The lock is released before the future is awaited, so
/// two concurrent misses on the same key both run the function and the later
/// `put` wins.
pub struct AsyncMemoized<A, T, F> {
    cache: AsyncCache<CacheKey, T>,
    func: F,
    name: &'static str,
    _args: PhantomData<fn(A)>,
}

/// Memoizes an async `func` with a cache built from `config`.
pub fn memoize_async<A, T, F, Fut>(config: CacheConfig, func: F) -> Result<AsyncMemoized<A, T, F>>
where
    T: Clone,
    F: Fn(A) -> Fut,
    Fut: Future<Output = T>,
{
    AsyncMemoized::new(config, func)
}

/// Memoizes a fallible async `func`; only `Ok` results are cached.
pub fn memoize_async_fallible<A, T, E, F, Fut>(
    config: CacheConfig,
    func: F,
) -> Result<AsyncMemoized<A, T, F>>
where
    T: Clone,
    F: Fn(A) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    AsyncMemoized::new(config, func)
}

impl<A, T: Clone, F> AsyncMemoized<A, T, F> {
    /// Creates the wrapper, rejecting invalid configs.
    pub fn new(config: CacheConfig, func: F) -> Result<Self> {
        Ok(Self {
            cache: AsyncCache::new(config)?,
            func,
            name: "anonymous",
            _args: PhantomData,
        })
    }

    /// Sets the name used in log events.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Statistics of the underlying cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Empties the underlying cache and resets its statistics.
    pub async fn cache_clear(&self) {
        self.cache.clear().await
    }
}

impl<A: Serialize, T: Clone, F> AsyncMemoized<A, T, F> {
    /// Calls an infallible async function through the cache.
    pub async fn call<Fut>(&self, args: A) -> Result<T>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T>,
    {
        self.lookup_or_invoke(args, |args| {
            let fut = (self.func)(args);
            async move { Ok::<T, CacheError>(fut.await) }
        })
        .await
    }

    /// Calls a fallible async function through the cache.
    ///
    /// Errors from the function are returned unchanged and never cached.
    pub async fn try_call<E, Fut>(&self, args: A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<CacheError>,
    {
        self.lookup_or_invoke(args, |args| (self.func)(args)).await
    }

    async fn lookup_or_invoke<E, I, Fut>(&self, args: A, invoke: I) -> std::result::Result<T, E>
    where
        E: From<CacheError>,
        I: FnOnce(A) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let key = CacheKey::derive(&args)?;

        if let Some(value) = self.cache.get(&key).await {
            debug!(function = self.name, "Async cache hit");
            return Ok(value);
        }

        debug!(function = self.name, "Async cache miss");
        match invoke(args).await {
            Ok(value) => {
                self.cache.put(key, value.clone()).await;
                Ok(value)
            }
            Err(err) => {
                debug!(function = self.name, "Async call failed, result not cached");
                Err(err)
            }
        }
    }
}
