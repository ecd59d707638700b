//! No-op cache implementation for disabled caching.

use super::service::{CacheService, CachedValue};
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when caching is explicitly disabled (`CACHE_ENABLED=false`). Every
/// read through [`super::ReadThroughCache`] becomes a miss, so every call
/// reaches the database.
///
/// # Use Cases
///
/// - Debugging suspected stale reads
/// - Testing scenarios where caching should be bypassed
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheService for NullCache {
    fn get(&self, _key: &str) -> Option<CachedValue> {
        None
    }

    fn set(&self, _key: String, _value: CachedValue, _ttl: Duration) {}

    fn invalidate(&self, _pattern: &str) -> usize {
        0
    }

    fn clear_all(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }

    fn backend_name(&self) -> &'static str {
        "null"
    }
}
