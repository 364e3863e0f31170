//! Repository Module
//!
//! Configuration source and calculation history, held in process memory.

mod history;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::canonical_pack_sizes;
use crate::config::{DEFAULT_MAX_PACK_SIZE, DEFAULT_PACK_SIZES};
use crate::error::{RepoError, RepoResult};
use crate::packing::{oversized_pack, validate, Decomposition};

pub use history::HistoryEntry;

/// History entries returned when a caller asks for a non-positive limit.
const FALLBACK_HISTORY_LIMIT: usize = 10;

// == Pack Config ==
/// The active pack size set and when it last changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub pack_sizes: Vec<i64>,
    pub updated_at: DateTime<Utc>,
}

// == Repository ==
/// Active pack sizes plus a bounded, newest-last calculation log.
#[derive(Debug)]
pub struct Repository {
    pack_config: RwLock<Option<PackConfig>>,
    history: RwLock<HistoryLog>,
    max_pack_size: i64,
}

#[derive(Debug)]
struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
    capacity: usize,
}

impl Repository {
    // == Constructor ==
    /// Creates an empty repository retaining at most `history_capacity` calculations
    /// and accepting pack sizes up to `max_pack_size`.
    pub fn new(history_capacity: usize, max_pack_size: i64) -> Self {
        Self {
            max_pack_size,
            pack_config: RwLock::new(None),
            history: RwLock::new(HistoryLog {
                entries: VecDeque::new(),
                next_id: 1,
                capacity: history_capacity.max(1),
            }),
        }
    }

    /// Creates a repository seeded with `pack_sizes`.
    pub async fn with_pack_sizes(
        history_capacity: usize,
        max_pack_size: i64,
        pack_sizes: &[i64],
    ) -> RepoResult<Self> {
        let repo = Self::new(history_capacity, max_pack_size);
        repo.set_pack_sizes(pack_sizes).await?;
        Ok(repo)
    }

    // == Pack Sizes ==
    /// Active pack sizes, falling back to the standard set when none are stored.
    pub async fn get_pack_sizes(&self) -> Vec<i64> {
        self.pack_config().await.pack_sizes
    }

    pub async fn pack_config(&self) -> PackConfig {
        self.pack_config
            .read()
            .await
            .clone()
            .unwrap_or_else(|| PackConfig {
                pack_sizes: DEFAULT_PACK_SIZES.to_vec(),
                updated_at: Utc::now(),
            })
    }

    /// Replaces the active pack sizes, stored sorted and deduplicated.
    pub async fn set_pack_sizes(&self, pack_sizes: &[i64]) -> RepoResult<PackConfig> {
        if !validate(pack_sizes) {
            return Err(RepoError::InvalidPackSizes(pack_sizes.to_vec()));
        }
        if let Some(size) = oversized_pack(pack_sizes, self.max_pack_size) {
            return Err(RepoError::PackSizeTooLarge {
                size,
                max: self.max_pack_size,
            });
        }

        let config = PackConfig {
            pack_sizes: canonical_pack_sizes(pack_sizes),
            updated_at: Utc::now(),
        };
        *self.pack_config.write().await = Some(config.clone());

        info!(pack_sizes = ?config.pack_sizes, "Pack sizes updated");
        Ok(config)
    }

    // == History ==
    /// Records a computed decomposition, dropping the oldest entry when full.
    pub async fn save_calculation(
        &self,
        order_quantity: i64,
        pack_sizes: &[i64],
        decomposition: &Decomposition,
    ) -> HistoryEntry {
        let mut log = self.history.write().await;

        let entry = HistoryEntry::new(log.next_id, order_quantity, pack_sizes, decomposition);
        log.next_id += 1;

        if log.entries.len() >= log.capacity {
            log.entries.pop_front();
        }
        log.entries.push_back(entry.clone());

        entry
    }

    /// Most recent calculations first. A limit of 0 falls back to 10.
    pub async fn get_history(&self, limit: usize) -> Vec<HistoryEntry> {
        let limit = if limit == 0 {
            FALLBACK_HISTORY_LIMIT
        } else {
            limit
        };

        let log = self.history.read().await;
        log.entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn clear_history(&self) {
        self.history.write().await.entries.clear();
    }

    pub async fn history_len(&self) -> usize {
        self.history.read().await.entries.len()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(1000, DEFAULT_MAX_PACK_SIZE)
    }
}
