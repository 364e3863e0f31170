//! Calculator Module
//!
//! Request flow in front of the decomposition engine: cache lookup, compute on
//! miss, memoize, record history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::cache::ResultCache;
use crate::packing::{decompose, Decomposition};
use crate::repo::Repository;

// == Calculation Outcome ==
/// A decomposition plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    pub order_quantity: i64,
    pub pack_sizes: Vec<i64>,
    pub decomposition: Decomposition,
    /// Wall time spent computing or looking up
    pub elapsed: Duration,
    /// Served from the cache
    pub cached: bool,
    /// Hit count of the cache entry, when cached
    pub cache_hit_count: Option<u64>,
    /// TTL the cache entry now carries, when cached
    pub cache_ttl: Option<Duration>,
}

// == Calculator ==
/// Answers order requests using the engine, the result cache and the repository.
#[derive(Clone)]
pub struct Calculator {
    cache: Arc<dyn ResultCache>,
    repo: Arc<Repository>,
}

impl Calculator {
    pub fn new(cache: Arc<dyn ResultCache>, repo: Arc<Repository>) -> Self {
        Self { cache, repo }
    }

    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    pub fn repo(&self) -> &Arc<Repository> {
        &self.repo
    }

    /// Decomposes `order_quantity`, using `pack_sizes` or the configured set when None.
    ///
    /// Cache and history failures never affect the returned decomposition.
    pub async fn calculate(
        &self,
        order_quantity: i64,
        pack_sizes: Option<&[i64]>,
    ) -> CalculationOutcome {
        let pack_sizes = match pack_sizes {
            Some(sizes) if !sizes.is_empty() => sizes.to_vec(),
            _ => self.repo.get_pack_sizes().await,
        };

        let started = Instant::now();

        if let Some(entry) = self.cache.get(order_quantity, &pack_sizes).await {
            info!(
                items = order_quantity,
                pack_sizes = ?pack_sizes,
                hit_count = entry.hit_count,
                ttl_secs = entry.current_ttl.as_secs(),
                "Cache HIT"
            );
            return CalculationOutcome {
                order_quantity,
                pack_sizes,
                decomposition: entry.decomposition,
                elapsed: started.elapsed(),
                cached: true,
                cache_hit_count: Some(entry.hit_count),
                cache_ttl: Some(entry.current_ttl),
            };
        }

        if self.cache.is_enabled() {
            info!(items = order_quantity, pack_sizes = ?pack_sizes, "Cache MISS");
        }

        let decomposition = decompose(order_quantity, &pack_sizes);
        let elapsed = started.elapsed();

        if let Err(err) = self
            .cache
            .put(order_quantity, &pack_sizes, &decomposition)
            .await
        {
            warn!(error = %err, "Failed to cache result");
        }

        self.repo
            .save_calculation(order_quantity, &pack_sizes, &decomposition)
            .await;

        CalculationOutcome {
            order_quantity,
            pack_sizes,
            decomposition,
            elapsed,
            cached: false,
            cache_hit_count: None,
            cache_ttl: None,
        }
    }
}
