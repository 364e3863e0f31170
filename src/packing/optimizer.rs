//! Optimizer Module
//!
//! Finds the optimal pack decomposition for an order quantity.
//!
//! Rules, in priority order:
//! 1. Only whole packs are shipped.
//! 2. Ship the fewest items possible, never fewer than ordered.
//! 3. Among decompositions shipping the same number of items, use the fewest packs.

use std::collections::BTreeMap;

use crate::packing::Decomposition;

/// Marks a total that no combination of packs reaches exactly.
const UNREACHABLE: u32 = u32::MAX;

/// Largest cost table the engine will allocate, in item totals.
///
/// Requests whose `order_quantity + max_size` exceeds this are treated as
/// infeasible. Callers bound their inputs well below it.
pub const MAX_TABLE_SLOTS: usize = 1 << 28;

// == Decompose ==
/// Computes the optimal decomposition of `order_quantity` into packs of `pack_sizes`.
///
/// Pack sizes may arrive in any order and with duplicates; non-positive sizes are
/// ignored. A non-positive quantity, an empty (or entirely unusable) size set, a
/// table larger than [`MAX_TABLE_SLOTS`], or an infeasible request all yield
/// [`Decomposition::empty`].
///
/// Runs an unbounded coin-change table over `[0, order_quantity + max_size]`, which
/// is always enough: an optimal total exceeds the order by less than the largest
/// pack. Time and space are `O((order_quantity + max_size) × sizes)`.
pub fn decompose(order_quantity: i64, pack_sizes: &[i64]) -> Decomposition {
    if order_quantity <= 0 {
        return Decomposition::empty();
    }

    let sizes = canonical_sizes(pack_sizes);
    let Some(&max_size) = sizes.last() else {
        return Decomposition::empty();
    };

    let Some((order, limit)) = table_bounds(order_quantity as u64, max_size) else {
        return Decomposition::empty();
    };

    let Some(table) = PackTable::build(&sizes, limit) else {
        return Decomposition::empty();
    };

    // The first reachable total at or above the order is the minimum feasible one,
    // and its table cost is already the fewest packs for that exact total.
    let Some(best_total) = (order..=limit).find(|&n| table.min_packs[n] != UNREACHABLE) else {
        return Decomposition::empty();
    };

    Decomposition::from_counts(order as u64, table.reconstruct(&sizes, best_total))
}

// == Validate ==
/// Checks whether a pack size set is usable: non-empty with every member positive.
pub fn validate(pack_sizes: &[i64]) -> bool {
    !pack_sizes.is_empty() && pack_sizes.iter().all(|&size| size > 0)
}

/// Returns the first size above `max_pack_size`, if any.
pub fn oversized_pack(pack_sizes: &[i64], max_pack_size: i64) -> Option<i64> {
    pack_sizes.iter().copied().find(|&size| size > max_pack_size)
}

// == GCD ==
/// Greatest common divisor of all pack sizes, 0 for an empty set.
///
/// Orders that are not a multiple of this value always carry waste.
pub fn gcd_of(pack_sizes: &[i64]) -> u64 {
    pack_sizes
        .iter()
        .map(|size| size.unsigned_abs())
        .fold(0, gcd)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Sorted, deduplicated, positive sizes.
fn canonical_sizes(pack_sizes: &[i64]) -> Vec<usize> {
    let mut sizes: Vec<usize> = pack_sizes
        .iter()
        .filter(|&&size| size > 0)
        .filter_map(|&size| usize::try_from(size).ok())
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Order and table limit as indices, or None when the table would exceed
/// [`MAX_TABLE_SLOTS`].
fn table_bounds(order: u64, max_size: usize) -> Option<(usize, usize)> {
    let order = usize::try_from(order).ok()?;
    let limit = order.checked_add(max_size)?;
    // The table needs limit + 1 slots.
    (limit < MAX_TABLE_SLOTS).then_some((order, limit))
}

// == Pack Table ==
/// Cost table indexed by item total.
///
/// `min_packs[n]` is the fewest packs summing to exactly `n`; `best_size[n]` is the
/// index (into the sorted sizes) of the pack that achieved it, used to walk back.
struct PackTable {
    min_packs: Vec<u32>,
    best_size: Vec<u32>,
}

impl PackTable {
    /// Fills the table up to `limit`, or None if the memory cannot be reserved.
    fn build(sizes: &[usize], limit: usize) -> Option<Self> {
        let mut min_packs = slots(limit + 1, UNREACHABLE)?;
        let mut best_size = slots(limit + 1, 0u32)?;
        min_packs[0] = 0;

        for n in 1..=limit {
            // Sizes are ascending, so a strict comparison keeps the smallest size
            // among those tying on pack count.
            for (idx, &size) in sizes.iter().enumerate() {
                if size > n {
                    break;
                }
                let prev = min_packs[n - size];
                if prev == UNREACHABLE {
                    continue;
                }
                let candidate = prev.saturating_add(1);
                if candidate < min_packs[n] {
                    min_packs[n] = candidate;
                    best_size[n] = idx as u32;
                }
            }
        }

        Some(Self {
            min_packs,
            best_size,
        })
    }

    /// Walks back from `total` collecting per-size counts.
    fn reconstruct(&self, sizes: &[usize], total: usize) -> BTreeMap<u64, u64> {
        let mut counts = BTreeMap::new();
        let mut remaining = total;

        while remaining > 0 {
            let size = sizes[self.best_size[remaining] as usize];
            *counts.entry(size as u64).or_insert(0) += 1;
            remaining -= size;
        }

        counts
    }
}

fn slots(len: usize, fill: u32) -> Option<Vec<u32>> {
    let mut table = Vec::new();
    table.try_reserve_exact(len).ok()?;
    table.resize(len, fill);
    Some(table)
}
