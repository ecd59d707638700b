//! In-process cache with per-entry TTL and lazy expiry.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::service::{CacheService, CachedValue};

/// A stored value together with the instant it was written and its TTL.
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// An entry is readable while `now <= stored_at + ttl`.
    fn is_fresh(&self, now: Instant) -> bool {
        match self.stored_at.checked_add(self.ttl) {
            Some(expires_at) => now <= expires_at,
            None => true,
        }
    }
}

/// Thread-safe map of string keys to values with per-entry expiry.
///
/// There is no background sweep: an expired entry stays in memory until the
/// next read of its key, an overwrite, or an invalidation removes it.
///
/// Time is read from [`tokio::time::Instant`], so tests can drive expiry with a
/// paused runtime clock.
pub struct MemoryCache<V = CachedValue> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> MemoryCache<V> {
    pub fn new() -> Self {
        debug!("Using MemoryCache");
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        match self.entries.get(key) {
            None => return None,
            Some(entry) if entry.is_fresh(now) => return Some(entry.value.clone()),
            Some(_) => {}
        }

        // Only drop the entry if it is still the expired one; a concurrent
        // writer may have replaced it since the read above.
        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        debug!("Cache EXPIRED: {}", key);
        None
    }

    pub fn set(&self, key: String, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn invalidate(&self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before.saturating_sub(self.entries.len())
    }

    pub fn clear_all(&self) -> usize {
        let before = self.entries.len();
        self.entries.clear();
        before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheService for MemoryCache<CachedValue> {
    fn get(&self, key: &str) -> Option<CachedValue> {
        MemoryCache::get(self, key)
    }

    fn set(&self, key: String, value: CachedValue, ttl: Duration) {
        MemoryCache::set(self, key, value, ttl)
    }

    fn invalidate(&self, pattern: &str) -> usize {
        MemoryCache::invalidate(self, pattern)
    }

    fn clear_all(&self) -> usize {
        MemoryCache::clear_all(self)
    }

    fn len(&self) -> usize {
        MemoryCache::len(self)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
