//! History Entry Module
//!
//! A record of one computed (not cached) decomposition.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::packing::Decomposition;

/// One calculation as reported by GET /api/history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub items: i64,
    pub pack_sizes: Vec<i64>,
    /// Pack size -> count
    pub result: BTreeMap<u64, u64>,
    pub total_items: u64,
    pub total_packs: u64,
    pub waste: u64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        id: u64,
        items: i64,
        pack_sizes: &[i64],
        decomposition: &Decomposition,
    ) -> Self {
        Self {
            id,
            items,
            pack_sizes: pack_sizes.to_vec(),
            result: decomposition.packs.clone(),
            total_items: decomposition.total_items,
            total_packs: decomposition.total_packs,
            waste: decomposition.waste,
            timestamp: Utc::now(),
        }
    }
}
