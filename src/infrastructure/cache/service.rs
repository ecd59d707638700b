//! Cache backend trait and shared value types.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

/// Type-erased cached payload.
///
/// The backend never interprets values; [`super::ReadThroughCache`] downcasts
/// them back to the type the caller asked for.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Storage backend for the read-through cache.
///
/// Implementations must be thread-safe. None of the operations can fail:
/// an unusable backend behaves like an always-empty cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map with lazy TTL expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
pub trait CacheService: Send + Sync {
    /// Returns the value stored under `key` if it has not expired.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    fn get(&self, key: &str) -> Option<CachedValue>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: String, value: CachedValue, ttl: Duration);

    /// Removes every entry whose key contains `pattern`.
    ///
    /// Returns the number of removed entries.
    fn invalidate(&self, pattern: &str) -> usize;

    /// Removes every entry. Returns the number of removed entries.
    fn clear_all(&self) -> usize;

    /// Number of entries currently held, including ones that expired but
    /// have not been read since.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short backend name for diagnostics.
    fn backend_name(&self) -> &'static str;
}
