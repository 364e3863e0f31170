//! Response DTOs for the pack calculator API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::calculator::CalculationOutcome;
use crate::models::Preset;
use crate::repo::HistoryEntry;

/// Response body for POST /api/calculate
///
/// `result`, `total_items`, `total_packs` and `waste` are the decomposition as computed.
#[derive(Debug, Clone, Serialize)]
pub struct CalculateResponse {
    /// Original order quantity
    pub items: i64,
    /// Pack sizes used
    pub pack_sizes: Vec<i64>,
    /// Pack size -> count
    pub result: BTreeMap<u64, u64>,
    pub total_items: u64,
    pub total_packs: u64,
    pub waste: u64,
    pub calculation_time_ms: f64,
    /// Whether the result was served from the cache
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit_count: Option<u64>,
}

impl From<CalculationOutcome> for CalculateResponse {
    fn from(outcome: CalculationOutcome) -> Self {
        let d = outcome.decomposition;
        Self {
            items: outcome.order_quantity,
            pack_sizes: outcome.pack_sizes,
            result: d.packs,
            total_items: d.total_items,
            total_packs: d.total_packs,
            waste: d.waste,
            calculation_time_ms: outcome.elapsed.as_secs_f64() * 1000.0,
            cached: outcome.cached,
            cache_ttl_secs: outcome.cache_ttl.map(|ttl| ttl.as_secs()),
            cache_hit_count: outcome.cache_hit_count,
        }
    }
}

/// Response body for GET /api/presets
#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<Preset>,
}

/// Response body for GET /api/history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub count: usize,
}

impl HistoryResponse {
    pub fn new(history: Vec<HistoryEntry>) -> Self {
        Self {
            count: history.len(),
            history,
        }
    }
}

/// Response body for GET /api/packs/config
#[derive(Debug, Clone, Serialize)]
pub struct PackConfigResponse {
    pub pack_sizes: Vec<i64>,
    /// Greatest common divisor of the sizes
    pub gcd: u64,
    pub updated_at: DateTime<Utc>,
}

/// Response body for POST /api/packs/config
#[derive(Debug, Clone, Serialize)]
pub struct ConfigUpdateResponse {
    pub pack_sizes: Vec<i64>,
    pub updated_at: DateTime<Utc>,
    pub message: String,
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub enabled: bool,
    #[serde(flatten)]
    pub stats: CacheStats,
}

/// Response body for GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, "ok" while serving
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub uptime_secs: u64,
}

impl HealthResponse {
    pub fn ok(uptime_secs: u64) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            uptime_secs,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
