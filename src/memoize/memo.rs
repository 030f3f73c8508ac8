//! Blocking Memoizer
//!
//! Wraps a plain function so repeated calls with equal arguments are served
//! from a [`SyncCache`].

use std::marker::PhantomData;

use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheStats, SyncCache};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::memoize::CacheKey;

// == Memoized ==
/// A function whose results are cached by argument.
///
/// `A` is the argument type: a tuple for positional arguments, a struct for
/// named ones. The cache lock is never held while the wrapped function runs,
/// so the function may call back into the same memoizer (recursion).
pub struct Memoized<A, T, F> {
    cache: SyncCache<CacheKey, T>,
    func: F,
    name: &'static str,
    _args: PhantomData<fn(A)>,
}

/// Memoizes an infallible `func` with a cache built from `config`.
pub fn memoize<A, T, F>(config: CacheConfig, func: F) -> Result<Memoized<A, T, F>>
where
    T: Clone,
    F: Fn(A) -> T,
{
    Memoized::new(config, func)
}

/// Memoizes a fallible `func`; only `Ok` results are cached.
pub fn memoize_fallible<A, T, E, F>(config: CacheConfig, func: F) -> Result<Memoized<A, T, F>>
where
    T: Clone,
    F: Fn(A) -> std::result::Result<T, E>,
{
    Memoized::new(config, func)
}

impl<A, T: Clone, F> Memoized<A, T, F> {
    /// Creates the wrapper, rejecting invalid configs.
    pub fn new(config: CacheConfig, func: F) -> Result<Self> {
        Ok(Self {
            cache: SyncCache::new(config)?,
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
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Empties the underlying cache and resets its statistics.
    pub fn cache_clear(&self) {
        self.cache.clear()
    }
}

impl<A: Serialize, T: Clone, F> Memoized<A, T, F> {
    /// Calls an infallible function through the cache.
    ///
    /// The only error is a key derivation failure, raised before the cache
    /// or the function is touched.
    pub fn call(&self, args: A) -> Result<T>
    where
        F: Fn(A) -> T,
    {
        self.lookup_or_invoke(args, |args| Ok::<T, CacheError>((self.func)(args)))
    }

    /// Calls a fallible function through the cache.
    ///
    /// Errors from the function are returned unchanged and never cached.
    pub fn try_call<E>(&self, args: A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> std::result::Result<T, E>,
        E: From<CacheError>,
    {
        self.lookup_or_invoke(args, |args| (self.func)(args))
    }

    fn lookup_or_invoke<E, I>(&self, args: A, invoke: I) -> std::result::Result<T, E>
    where
        E: From<CacheError>,
        I: FnOnce(A) -> std::result::Result<T, E>,
    {
        let key = CacheKey::derive(&args)?;

        if let Some(value) = self.cache.get(&key) {
            debug!(function = self.name, "Cache hit");
            return Ok(value);
        }

        debug!(function = self.name, "Cache miss");
        match invoke(args) {
            Ok(value) => {
                self.cache.put(key, value.clone());
                Ok(value)
            }
            Err(err) => {
                debug!(function = self.name, "Call failed, result not cached");
                Err(err)
            }
        }
    }
}
