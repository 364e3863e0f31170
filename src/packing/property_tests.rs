//! Property-Based Tests for the Packing Module
//!
//! Uses proptest to check the optimizer against its ordering rules and an
//! exhaustive search on small inputs.

use proptest::prelude::*;

use crate::packing::decompose;

// == Strategies ==
/// Non-empty sets of positive pack sizes, possibly with duplicates.
fn pack_sizes_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..=500, 1..6)
}

/// Small sets where exhaustive search stays cheap.
fn small_pack_sizes_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(2i64..=15, 1..4)
}

/// Fewest packs summing to exactly `total`, by trying every count of the first size.
fn exhaustive_min_packs(total: u64, sizes: &[u64]) -> Option<u64> {
    let Some((&first, rest)) = sizes.split_first() else {
        return (total == 0).then_some(0);
    };

    (0..=total / first)
        .filter_map(|count| {
            exhaustive_min_packs(total - count * first, rest).map(|packs| packs + count)
        })
        .min()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Shipped items never fall short of the order and waste is the difference.
    #[test]
    fn prop_feasibility(order in 1i64..5_000, sizes in pack_sizes_strategy()) {
        let d = decompose(order, &sizes);

        prop_assert!(!d.is_empty());
        prop_assert!(d.total_items >= order as u64);
        prop_assert_eq!(d.waste, d.total_items - order as u64);
    }

    // Totals always agree with the per-size counts.
    #[test]
    fn prop_sum_consistency(order in 1i64..5_000, sizes in pack_sizes_strategy()) {
        let d = decompose(order, &sizes);

        let items: u64 = d.packs.iter().map(|(size, count)| size * count).sum();
        let packs: u64 = d.packs.values().sum();
        prop_assert_eq!(items, d.total_items);
        prop_assert_eq!(packs, d.total_packs);
    }

    // Waste stays strictly below the largest pack size.
    #[test]
    fn prop_waste_below_largest_pack(order in 1i64..5_000, sizes in pack_sizes_strategy()) {
        let d = decompose(order, &sizes);
        let max_size = *sizes.iter().max().unwrap() as u64;

        prop_assert!(d.waste < max_size);
    }

    // Only requested sizes appear in the result.
    #[test]
    fn prop_uses_only_given_sizes(order in 1i64..5_000, sizes in pack_sizes_strategy()) {
        let d = decompose(order, &sizes);

        for size in d.packs.keys() {
            prop_assert!(sizes.contains(&(*size as i64)));
        }
    }

    // Permuting the sizes never changes the chosen decomposition.
    #[test]
    fn prop_permutation_invariance(order in 1i64..2_000, sizes in pack_sizes_strategy()) {
        let mut reversed = sizes.clone();
        reversed.reverse();

        prop_assert_eq!(decompose(order, &sizes), decompose(order, &reversed));
    }

    // Matches exhaustive search on both the item total and the pack count.
    #[test]
    fn prop_matches_exhaustive_search(order in 1i64..40, sizes in small_pack_sizes_strategy()) {
        let d = decompose(order, &sizes);

        let mut canonical: Vec<u64> = sizes.iter().map(|&s| s as u64).collect();
        canonical.sort_unstable();
        canonical.dedup();
        let max_size = *canonical.last().unwrap();

        let expected = (order as u64..=order as u64 + max_size)
            .find_map(|total| exhaustive_min_packs(total, &canonical).map(|p| (total, p)));

        let (total, packs) = expected.unwrap();
        prop_assert_eq!(d.total_items, total);
        prop_assert_eq!(d.total_packs, packs);
    }

    // Non-positive quantities always produce the empty decomposition.
    #[test]
    fn prop_non_positive_order_is_empty(order in -10_000i64..=0, sizes in pack_sizes_strategy()) {
        prop_assert!(decompose(order, &sizes).is_empty());
    }
}
