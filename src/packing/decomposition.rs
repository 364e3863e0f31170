//! Decomposition Module
//!
//! The result of splitting an order into whole packs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// == Decomposition ==
/// A multiset of pack sizes fulfilling an order, with derived totals.
///
/// `packs` maps pack size to count and iterates in ascending size order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Pack size -> number of packs of that size
    pub packs: BTreeMap<u64, u64>,
    /// Sum of size × count
    pub total_items: u64,
    /// Sum of counts
    pub total_packs: u64,
    /// Items shipped beyond the order quantity
    pub waste: u64,
}

impl Decomposition {
    // == Constructor ==
    /// Returns the empty decomposition used for degenerate and infeasible requests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a decomposition from per-size counts, deriving the totals.
    ///
    /// Sizes with a zero count are dropped.
    pub fn from_counts(order_quantity: u64, counts: BTreeMap<u64, u64>) -> Self {
        let packs: BTreeMap<u64, u64> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
        let total_items: u64 = packs.iter().map(|(size, count)| size * count).sum();
        let total_packs: u64 = packs.values().sum();

        Self {
            packs,
            total_items,
            total_packs,
            waste: total_items.saturating_sub(order_quantity),
        }
    }

    // == Is Empty ==
    /// True when no packs were chosen.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Number of packs of the given size.
    pub fn count_of(&self, size: u64) -> u64 {
        self.packs.get(&size).copied().unwrap_or(0)
    }
}
