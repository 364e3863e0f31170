//! Adaptive Cache Module
//!
//! Store-backed result cache whose entries live longer each time they are reused.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::{
    fingerprint, CacheEntry, CacheStats, HitCounters, ResultCache, CACHE_KEY_PREFIX,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult, StoreResult};
use crate::packing::Decomposition;
use crate::store::KeyValueStore;

// == Adaptive Cache ==
/// Memoizes decompositions in a [`KeyValueStore`].
///
/// Entries start at `initial_ttl`; every hit doubles the TTL up to `max_ttl` and
/// re-persists the entry. Every store call is bounded by `op_timeout`.
pub struct AdaptiveCache {
    store: Arc<dyn KeyValueStore>,
    initial_ttl: Duration,
    max_ttl: Duration,
    op_timeout: Duration,
    counters: HitCounters,
}

impl AdaptiveCache {
    // == Constructor ==
    pub fn new(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        // A zero TTL would mean "no expiry" to the store.
        let initial_ttl = config.initial_ttl.max(Duration::from_millis(1));
        Self {
            store,
            initial_ttl,
            max_ttl: config.max_ttl.max(initial_ttl),
            op_timeout: config.op_timeout,
            counters: HitCounters::new(),
        }
    }

    pub fn initial_ttl(&self) -> Duration {
        self.initial_ttl
    }

    pub fn max_ttl(&self) -> Duration {
        self.max_ttl
    }

    /// Runs a store call under the operation timeout.
    async fn bounded<T>(&self, call: impl Future<Output = StoreResult<T>>) -> CacheResult<T> {
        match tokio::time::timeout(self.op_timeout, call).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }

    /// Loads and decodes the entry stored under `key`.
    async fn load(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        let Some(bytes) = self.bounded(self.store.get(key)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn persist(&self, key: &str, entry: &CacheEntry) -> CacheResult<()> {
        let bytes = serde_json::to_vec(entry)?;
        self.bounded(self.store.set(key, bytes, entry.current_ttl))
            .await
    }
}

#[async_trait]
impl ResultCache for AdaptiveCache {
    // == Get ==
    async fn get(&self, order_quantity: i64, pack_sizes: &[i64]) -> Option<CacheEntry> {
        let key = fingerprint(order_quantity, pack_sizes).store_key();

        let mut entry = match self.load(&key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key = %key, "Cache lookup found nothing");
                self.counters.record_miss();
                return None;
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Cache lookup failed, treating as miss");
                self.counters.record_miss();
                return None;
            }
        };

        entry.record_hit(self.max_ttl);
        if let Err(err) = self.persist(&key, &entry).await {
            warn!(key = %key, error = %err, "Failed to extend cache entry TTL");
        }

        self.counters.record_hit();
        Some(entry)
    }

    // == Put ==
    async fn put(
        &self,
        order_quantity: i64,
        pack_sizes: &[i64],
        decomposition: &Decomposition,
    ) -> CacheResult<()> {
        let key = fingerprint(order_quantity, pack_sizes).store_key();
        let entry = CacheEntry::new(
            order_quantity,
            pack_sizes,
            decomposition.clone(),
            self.initial_ttl,
        );
        self.persist(&key, &entry).await
    }

    // == Clear ==
    async fn clear(&self) -> CacheResult<()> {
        let keys = self.bounded(self.store.keys(CACHE_KEY_PREFIX)).await?;
        if !keys.is_empty() {
            let removed = self.bounded(self.store.delete(&keys)).await?;
            debug!(removed, "Cleared cache entries");
        }
        self.counters.reset();
        Ok(())
    }

    // == Stats ==
    async fn stats(&self) -> CacheStats {
        let (hits, misses) = self.counters.snapshot();
        let total_keys = match self.bounded(self.store.keys(CACHE_KEY_PREFIX)).await {
            Ok(keys) => keys.len() as u64,
            Err(err) => {
                warn!(error = %err, "Failed to count cache keys");
                0
            }
        };
        CacheStats::new(hits, misses, total_keys)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::packing::decompose;
    use crate::store::MemoryStore;

    const MINUTE: Duration = Duration::from_secs(60);
    const DAY: Duration = Duration::from_secs(86_400);

    fn config(initial_ttl: Duration, max_ttl: Duration) -> CacheConfig {
        CacheConfig {
            enabled: true,
            initial_ttl,
            max_ttl,
            op_timeout: Duration::from_millis(100),
            max_entries: 100,
        }
    }

    fn cache_with(store: MemoryStore, initial_ttl: Duration, max_ttl: Duration) -> AdaptiveCache {
        AdaptiveCache::new(Arc::new(store), &config(initial_ttl, max_ttl))
    }

    /// A store whose every call fails.
    struct DownStore;

    #[async_trait]
    impl KeyValueStore for DownStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn delete(&self, _keys: &[String]) -> StoreResult<usize> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn keys(&self, _prefix: &str) -> StoreResult<Vec<String>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    /// A store that never answers within the timeout.
    struct StalledStore;

    #[async_trait]
    impl KeyValueStore for StalledStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> StoreResult<()> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
        async fn delete(&self, _keys: &[String]) -> StoreResult<usize> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(0)
        }
        async fn keys(&self, _prefix: &str) -> StoreResult<Vec<String>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = cache_with(MemoryStore::new(100), 5 * MINUTE, DAY);
        let sizes = [250, 500, 1000];

        assert!(cache.get(251, &sizes).await.is_none());

        let d = decompose(251, &sizes);
        cache.put(251, &sizes, &d).await.unwrap();

        let entry = cache.get(251, &sizes).await.unwrap();
        assert_eq!(entry.decomposition, d);
        assert_eq!(entry.hit_count, 1);
        assert_eq!(entry.current_ttl, 10 * MINUTE);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[tokio::test]
    async fn test_hit_repersists_with_grown_ttl() {
        let store = MemoryStore::new(100);
        let cache = cache_with(store.clone(), 5 * MINUTE, DAY);
        let sizes = [3, 5];

        cache.put(10, &sizes, &decompose(10, &sizes)).await.unwrap();
        cache.get(10, &sizes).await.unwrap();
        let entry = cache.get(10, &sizes).await.unwrap();

        assert_eq!(entry.hit_count, 2);
        assert_eq!(entry.current_ttl, 20 * MINUTE);

        let key = fingerprint(10, &sizes).store_key();
        let remaining = store.ttl(&key).await.unwrap();
        assert!(remaining > 19 * MINUTE && remaining <= 20 * MINUTE);
    }

    #[tokio::test]
    async fn test_ttl_never_exceeds_max() {
        let cache = cache_with(MemoryStore::new(100), MINUTE, 5 * MINUTE);
        let sizes = [3, 5];
        cache.put(4, &sizes, &decompose(4, &sizes)).await.unwrap();

        let first = cache.get(4, &sizes).await.unwrap();
        assert_eq!(first.current_ttl, 2 * MINUTE);

        for _ in 0..10 {
            let entry = cache.get(4, &sizes).await.unwrap();
            assert!(entry.current_ttl <= 5 * MINUTE);
        }
        assert_eq!(cache.get(4, &sizes).await.unwrap().current_ttl, 5 * MINUTE);
    }

    #[tokio::test]
    async fn test_put_replaces_and_resets_entry() {
        let cache = cache_with(MemoryStore::new(100), MINUTE, DAY);
        let sizes = [3, 5];
        let d = decompose(10, &sizes);

        cache.put(10, &sizes, &d).await.unwrap();
        cache.get(10, &sizes).await.unwrap();
        cache.put(10, &sizes, &d).await.unwrap();

        let entry = cache.get(10, &sizes).await.unwrap();
        assert_eq!(entry.hit_count, 1);
        assert_eq!(entry.current_ttl, 2 * MINUTE);
    }

    #[tokio::test]
    async fn test_lookup_ignores_size_order() {
        let cache = cache_with(MemoryStore::new(100), MINUTE, DAY);
        cache
            .put(12, &[5, 3], &decompose(12, &[5, 3]))
            .await
            .unwrap();

        assert!(cache.get(12, &[3, 5, 5]).await.is_some());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = cache_with(MemoryStore::new(100), Duration::from_millis(30), DAY);
        let sizes = [3, 5];
        cache.put(10, &sizes, &decompose(10, &sizes)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.get(10, &sizes).await.is_none());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_clear_leaves_unrelated_keys() {
        let store = MemoryStore::new(100);
        store
            .set("session:abc", b"keep".to_vec(), DAY)
            .await
            .unwrap();

        let cache = cache_with(store.clone(), MINUTE, DAY);
        let sizes = [3, 5];
        cache.put(10, &sizes, &decompose(10, &sizes)).await.unwrap();
        cache.get(10, &sizes).await.unwrap();
        cache.get(11, &sizes).await;

        cache.clear().await.unwrap();

        assert!(cache.get(10, &sizes).await.is_none());
        assert_eq!(store.get("session:abc").await.unwrap(), Some(b"keep".to_vec()));

        // Only the lookup after the clear counts.
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.total_keys), (0, 1, 0));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_miss() {
        let store = MemoryStore::new(100);
        let key = fingerprint(10, &[3, 5]).store_key();
        store.set(&key, b"not json".to_vec(), DAY).await.unwrap();

        let cache = cache_with(store, MINUTE, DAY);
        assert!(cache.get(10, &[3, 5]).await.is_none());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_degrades() {
        let cache = AdaptiveCache::new(Arc::new(DownStore), &config(MINUTE, DAY));
        let sizes = [3, 5];

        assert!(cache.get(10, &sizes).await.is_none());
        assert!(matches!(
            cache.put(10, &sizes, &decompose(10, &sizes)).await,
            Err(CacheError::Store(StoreError::Unavailable(_)))
        ));
        assert!(cache.clear().await.is_err());

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_keys, 0);
    }

    #[tokio::test]
    async fn test_stalled_store_times_out() {
        let cache = AdaptiveCache::new(
            Arc::new(StalledStore),
            &CacheConfig {
                op_timeout: Duration::from_millis(20),
                ..config(MINUTE, DAY)
            },
        );
        let sizes = [3, 5];

        let started = std::time::Instant::now();
        assert!(cache.get(10, &sizes).await.is_none());
        assert!(matches!(
            cache.put(10, &sizes, &decompose(10, &sizes)).await,
            Err(CacheError::Timeout(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_constructor_normalizes_policy() {
        let cache = AdaptiveCache::new(
            Arc::new(MemoryStore::new(10)),
            &config(Duration::ZERO, Duration::ZERO),
        );
        assert!(!cache.initial_ttl().is_zero());
        assert!(cache.max_ttl() >= cache.initial_ttl());
    }
}
