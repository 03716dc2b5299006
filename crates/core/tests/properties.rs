//! Property tests against an exhaustive oracle

use std::collections::{BTreeMap, BTreeSet};

use packopt::{calculation::Calculation, compute, sizes::PackSizes};
use proptest::prelude::*;

/// Fewest packs for every total up to `ceiling`.
///
/// Breadth-first over pack count: every total first seen after `n` rounds needs exactly `n`
/// packs.
fn exhaustive(sizes: &[u64], ceiling: u64) -> BTreeMap<u64, u64> {
    let mut seen = BTreeMap::from([(0, 0)]);
    let mut frontier = BTreeSet::from([0]);
    let mut packs = 0;

    while !frontier.is_empty() {
        packs += 1;

        let next: BTreeSet<u64> = frontier
            .iter()
            .flat_map(|sum| sizes.iter().map(move |size| sum + size))
            .filter(|total| *total <= ceiling && !seen.contains_key(total))
            .collect();

        for &total in &next {
            seen.insert(total, packs);
        }

        frontier = next;
    }

    seen
}

fn sizes_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-5_i64..40, 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn matches_exhaustive_search(amount in 1_i64..150, raw in sizes_strategy()) {
        let sizes = PackSizes::sanitize(&raw);
        let allocation = compute(amount, &raw)?;

        let Some(largest) = sizes.largest() else {
            prop_assert_eq!(allocation.total_items(), 0);
            prop_assert_eq!(allocation.total_packs(), 0);
            prop_assert!(allocation.breakdown().is_empty());
            return Ok(());
        };

        let amount = amount.unsigned_abs();
        let reachable = exhaustive(sizes.as_slice(), amount + largest - 1);

        let (&total, &packs) = reachable
            .range(amount..)
            .next()
            .ok_or_else(|| TestCaseError::fail("oracle found no reachable total"))?;

        // Feasibility
        prop_assert!(allocation.total_items() >= amount);

        // Least overage: no reachable total in [amount, total_items)
        prop_assert_eq!(allocation.total_items(), total);

        // Fewest packs for that total
        prop_assert_eq!(allocation.total_packs(), packs);

        // Exactness
        prop_assert_eq!(allocation.breakdown().total_items(), allocation.total_items());
        prop_assert_eq!(allocation.breakdown().total_packs(), allocation.total_packs());

        for (size, count) in allocation.breakdown().iter() {
            prop_assert!(count > 0);
            prop_assert!(sizes.iter().any(|candidate| candidate == size));
        }
    }

    #[test]
    fn non_positive_amounts_ship_nothing(amount in i64::MIN..=0, raw in sizes_strategy()) {
        let allocation = compute(amount, &raw)?;

        prop_assert_eq!(allocation.total_items(), 0);
        prop_assert_eq!(allocation.total_packs(), 0);
        prop_assert!(allocation.breakdown().is_empty());
    }

    #[test]
    fn repeated_calls_agree(amount in -10_i64..2_000, raw in sizes_strategy()) {
        prop_assert_eq!(compute(amount, &raw)?, compute(amount, &raw)?);
    }

    #[test]
    fn overage_is_below_the_largest_pack(amount in 1_i64..5_000, raw in sizes_strategy()) {
        let calculation = Calculation::solve(amount, &raw)?;

        if let Some(largest) = PackSizes::sanitize(&raw).largest() {
            prop_assert!(calculation.overage < largest);
            prop_assert_eq!(calculation.total_items - calculation.overage, amount.unsigned_abs());
        }
    }
}
