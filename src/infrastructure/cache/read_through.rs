//! Read-through cache front used by the application services.

use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::key::{derive_key, namespace_of};
use super::memory_cache::MemoryCache;
use super::service::{CacheService, CachedValue};

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    fetch_failures: AtomicU64,
    invalidated: AtomicU64,
}

/// Point-in-time cache statistics, exposed on `/health` and the admin API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub backend: &'static str,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub fetch_failures: u64,
    pub invalidated: u64,
    pub single_flight: bool,
}

/// Memoizes successful results of remote reads per (operation, parameters).
///
/// A fresh entry is returned without calling the fetch function. A miss calls
/// it and stores an `Ok` result with `stored_at = now`. An `Err` is handed back
/// unchanged and nothing is stored, so the next call for the same key fetches
/// again.
///
/// Writes elsewhere in the system call [`ReadThroughCache::invalidate`] with a
/// namespace (`"ideaVault"`, `"workspace"`, ...) to force the next read to
/// refetch.
///
/// Concurrent misses for one key each run their own fetch unless
/// single-flight is enabled, in which case later callers wait for the first
/// one and reuse its result.
pub struct ReadThroughCache {
    backend: Arc<dyn CacheService>,
    default_ttl: Duration,
    single_flight: bool,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    counters: Counters,
}

impl ReadThroughCache {
    /// Creates a cache over `backend`. `default_ttl` applies when a call passes
    /// `ttl = None`.
    pub fn new(backend: Arc<dyn CacheService>, default_ttl: Duration) -> Self {
        Self {
            backend,
            default_ttl,
            single_flight: false,
            in_flight: DashMap::new(),
            counters: Counters::default(),
        }
    }

    /// Creates a cache over a fresh [`MemoryCache`].
    pub fn in_memory(default_ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryCache::<CachedValue>::new()), default_ttl)
    }

    /// Enables or disables per-key deduplication of concurrent misses.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the cached result for `(operation, params)` or runs `fetch`.
    ///
    /// # Arguments
    ///
    /// - `operation` - logical query name, `namespace.operation` by convention
    /// - `params` - anything serializable to JSON; field order is irrelevant
    /// - `ttl` - entry lifetime, `None` for the default
    /// - `fetch` - the remote read, invoked only on a miss
    ///
    /// # Errors
    ///
    /// Returns exactly the error produced by `fetch`. The cache itself never
    /// fails: if the parameters cannot be turned into a key, the call bypasses
    /// the cache and fetches directly.
    pub async fn get_or_fetch<P, T, E, F, Fut>(
        &self,
        operation: &str,
        params: &P,
        ttl: Option<Duration>,
        fetch: F,
    ) -> Result<T, E>
    where
        P: Serialize + ?Sized,
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = match derive_key(operation, params) {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    "Cannot derive cache key for {}: {}. Bypassing cache.",
                    operation, e
                );
                return fetch().await;
            }
        };
        let namespace = namespace_of(operation);
        let ttl = ttl.unwrap_or(self.default_ttl);

        if let Some(value) = self.lookup::<T>(&key) {
            self.record_hit(namespace, &key);
            return Ok(value);
        }

        if !self.single_flight {
            return self.fetch_and_store(key, namespace, ttl, fetch).await;
        }

        let slot = self.in_flight.entry(key.clone()).or_default().value().clone();
        let guard = slot.lock().await;

        // Filled by the caller we waited for.
        let result = if let Some(value) = self.lookup::<T>(&key) {
            self.record_hit(namespace, &key);
            Ok(value)
        } else {
            self.fetch_and_store(key.clone(), namespace, ttl, fetch).await
        };

        drop(guard);
        // Two references: the map's and ours. Anything more means another
        // caller is queued on the slot and will remove it later.
        self.in_flight
            .remove_if(&key, |_, s| Arc::strong_count(s) <= 2);

        result
    }

    /// Removes every entry whose key contains `pattern`.
    ///
    /// Returns the number of removed entries.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let removed = self.backend.invalidate(pattern);
        self.counters
            .invalidated
            .fetch_add(removed as u64, Ordering::Relaxed);
        debug!("Cache INVALIDATE: {} ({} entries)", pattern, removed);
        removed
    }

    /// Invalidates several namespaces in one call.
    pub fn invalidate_all_of(&self, patterns: &[&str]) -> usize {
        patterns.iter().map(|p| self.invalidate(p)).sum()
    }

    /// Drops every entry.
    pub fn clear_all(&self) -> usize {
        let removed = self.backend.clear_all();
        self.counters
            .invalidated
            .fetch_add(removed as u64, Ordering::Relaxed);
        info!("Cache cleared ({} entries)", removed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            backend: self.backend.backend_name(),
            entries: self.backend.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            fetch_failures: self.counters.fetch_failures.load(Ordering::Relaxed),
            invalidated: self.counters.invalidated.load(Ordering::Relaxed),
            single_flight: self.single_flight,
        }
    }

    fn lookup<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let value = self.backend.get(key)?;

        match value.downcast::<T>() {
            Ok(typed) => Some(typed.as_ref().clone()),
            Err(_) => {
                warn!("Cache entry {} holds an unexpected type; refetching", key);
                None
            }
        }
    }

    fn record_hit(&self, namespace: &str, key: &str) {
        self.counters.hits.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("cache_hits_total", "namespace" => namespace.to_owned()).increment(1);
        debug!("Cache HIT: {}", key);
    }

    async fn fetch_and_store<T, E, F, Fut>(
        &self,
        key: String,
        namespace: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("cache_misses_total", "namespace" => namespace.to_owned()).increment(1);
        debug!("Cache MISS: {}", key);

        match fetch().await {
            Ok(value) => {
                debug!("Cache SET: {} (TTL: {:?})", key, ttl);
                self.backend.set(key, Arc::new(value.clone()), ttl);
                Ok(value)
            }
            Err(e) => {
                self.counters.fetch_failures.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("cache_fetch_failures_total", "namespace" => namespace.to_owned())
                    .increment(1);
                debug!("Fetch failed for {}; nothing cached", key);
                Err(e)
            }
        }
    }
}
