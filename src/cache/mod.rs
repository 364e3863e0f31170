//! Cache Module
//!
//! Memoizes decompositions keyed by a fingerprint of the request, with a TTL
//! that grows every time an entry is reused.
//!
//! Caching is best-effort: lookups degrade to misses on store failure and
//! write failures are returned for the caller to log.

mod adaptive;
mod entry;
mod fingerprint;
mod noop;
mod stats;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::CacheConfig;
use crate::error::CacheResult;
use crate::packing::Decomposition;
use crate::store::KeyValueStore;

// Re-export public types
pub use adaptive::AdaptiveCache;
pub use entry::{next_ttl, CacheEntry};
pub use fingerprint::{canonical_pack_sizes, fingerprint, Fingerprint, CACHE_KEY_PREFIX};
pub use noop::NoopCache;
pub use stats::{CacheStats, HitCounters};

// == Result Cache ==
/// The four cache operations, shared by the active and pass-through variants.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Returns the cached entry, counting a hit and growing its TTL, or None.
    /// Never fails: store problems are reported as a miss.
    async fn get(&self, order_quantity: i64, pack_sizes: &[i64]) -> Option<CacheEntry>;

    /// Stores a fresh entry, replacing any previous one for the same request.
    async fn put(
        &self,
        order_quantity: i64,
        pack_sizes: &[i64],
        decomposition: &Decomposition,
    ) -> CacheResult<()>;

    /// Removes every entry this cache created and resets its counters.
    async fn clear(&self) -> CacheResult<()>;

    async fn stats(&self) -> CacheStats;

    fn is_enabled(&self) -> bool;
}

/// Picks the cache variant once, at construction.
pub fn build_cache(config: &CacheConfig, store: Arc<dyn KeyValueStore>) -> Arc<dyn ResultCache> {
    if config.enabled {
        Arc::new(AdaptiveCache::new(store, config))
    } else {
        Arc::new(NoopCache)
    }
}
