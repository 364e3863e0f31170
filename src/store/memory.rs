//! Memory Store Module
//!
//! HashMap storage with LRU tracking and TTL expiration, shared behind an
//! async RwLock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{KeyValueStore, LruTracker, StoreEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Memory Store ==
/// In-process key/value store. Cloning yields another handle to the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug)]
struct StoreInner {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                max_entries: max_entries.max(1),
            })),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let now = Instant::now();

        let expired: HashSet<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.entries.remove(key);
        }
        inner.lru.remove_all(&expired);

        expired.len()
    }

    /// Remaining lifetime of a live key, None if absent or without expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(StoreEntry::ttl_remaining)
    }

    /// Number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    // == Get ==
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        // Write lock: expired removal and LRU touch both mutate.
        let mut inner = self.inner.write().await;

        let Some(entry) = inner.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            inner.entries.remove(key);
            inner.lru.remove(key);
            return Ok(None);
        }

        let value = entry.value.clone();
        inner.lru.touch(key);
        Ok(Some(value))
    }

    // == Set ==
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidKey(format!(
                "Key must be 1..={} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidKey(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut inner = self.inner.write().await;

        let is_overwrite = inner.entries.contains_key(key);
        if !is_overwrite && inner.entries.len() >= inner.max_entries {
            match inner.lru.evict_oldest() {
                Some(evicted) => {
                    inner.entries.remove(&evicted);
                }
                None => {
                    return Err(StoreError::Full(
                        "Store is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        inner
            .entries
            .insert(key.to_string(), StoreEntry::new(value, ttl));
        inner.lru.touch(key);

        Ok(())
    }

    // == Delete ==
    async fn delete(&self, keys: &[String]) -> StoreResult<usize> {
        let mut inner = self.inner.write().await;

        let removed: HashSet<String> = keys
            .iter()
            .filter(|key| inner.entries.remove(key.as_str()).is_some())
            .cloned()
            .collect();
        inner.lru.remove_all(&removed);

        Ok(removed.len())
    }

    // == Keys ==
    async fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        let now = Instant::now();

        let mut keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort_unstable();

        Ok(keys)
    }
}
