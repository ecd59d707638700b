//! Read-through caching for repository reads.
//!
//! [`ReadThroughCache`] sits between the application services and the
//! repositories. It stores values in a [`CacheService`] backend:
//! - [`MemoryCache`] - In-process map with per-entry TTL (default)
//! - [`NullCache`] - No-op implementation for `CACHE_ENABLED=false`

mod key;
mod memory_cache;
pub mod namespace;
mod null_cache;
mod read_through;
mod service;

pub use key::{derive_key, namespace_of};
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use read_through::{CacheStats, ReadThroughCache};
pub use service::{CacheService, CachedValue};
