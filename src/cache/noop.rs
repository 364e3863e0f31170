//! No-op Cache Module
//!
//! Pass-through cache used when caching is disabled.

use async_trait::async_trait;

use crate::cache::{CacheEntry, CacheStats, ResultCache};
use crate::error::CacheResult;
use crate::packing::Decomposition;

/// Always misses; writes and clears succeed without doing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl ResultCache for NoopCache {
    async fn get(&self, _order_quantity: i64, _pack_sizes: &[i64]) -> Option<CacheEntry> {
        None
    }

    async fn put(
        &self,
        _order_quantity: i64,
        _pack_sizes: &[i64],
        _decomposition: &Decomposition,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
