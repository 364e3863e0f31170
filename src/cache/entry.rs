//! Cache Entry Module
//!
//! A memoized decomposition and its adaptive TTL state.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::canonical_pack_sizes;
use crate::packing::Decomposition;

// == Cache Entry ==
/// Stored form of a cached decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Order quantity the decomposition answers
    pub order_quantity: i64,
    /// Canonical pack sizes (ascending, deduplicated)
    pub pack_sizes: Vec<i64>,
    /// The memoized result
    pub decomposition: Decomposition,
    /// When the entry was first stored
    pub cached_at: DateTime<Utc>,
    /// Number of times the entry has been served
    pub hit_count: u64,
    /// TTL the entry was last persisted with
    #[serde(rename = "current_ttl_ms", with = "duration_ms")]
    pub current_ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Fresh entry with no hits and the initial TTL.
    pub fn new(
        order_quantity: i64,
        pack_sizes: &[i64],
        decomposition: Decomposition,
        initial_ttl: Duration,
    ) -> Self {
        Self {
            order_quantity,
            pack_sizes: canonical_pack_sizes(pack_sizes),
            decomposition,
            cached_at: Utc::now(),
            hit_count: 0,
            current_ttl: initial_ttl,
        }
    }

    // == Record Hit ==
    /// Counts a reuse and grows the TTL, returning the new TTL.
    pub fn record_hit(&mut self, max_ttl: Duration) -> Duration {
        self.hit_count += 1;
        self.current_ttl = next_ttl(self.current_ttl, max_ttl);
        self.current_ttl
    }
}

/// Doubles `current`, capped at `max_ttl`.
pub fn next_ttl(current: Duration, max_ttl: Duration) -> Duration {
    current.saturating_mul(2).min(max_ttl)
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
