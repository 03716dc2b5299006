//! Breakdown

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    solver::SolverError,
    table::{PackTable, Reachability},
};

/// Pack size to pack count mapping for a chosen solution.
///
/// Every count is positive; sizes with no packs are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown {
    counts: BTreeMap<u64, u64>,
}

impl Breakdown {
    /// Walk the table's choice trace back from `total` to zero.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvariantViolation`] if the trace reaches an unreachable total
    /// before zero, which means the table itself is inconsistent.
    pub fn reconstruct(table: &PackTable, total: u64) -> Result<Self, SolverError> {
        let mut breakdown = Self::default();
        let mut remaining = total;

        while remaining > 0 {
            let Some(Reachability::Reachable { size, .. }) = table.get(remaining) else {
                return Err(SolverError::InvariantViolation {
                    message: "backtracking reached an unreachable total",
                });
            };

            remaining = remaining
                .checked_sub(size)
                .ok_or(SolverError::InvariantViolation {
                    message: "recorded pack size exceeds its total",
                })?;

            breakdown.add(size, 1);
        }

        Ok(breakdown)
    }

    /// Add `count` packs of `size`.
    pub fn add(&mut self, size: u64, count: u64) {
        if count == 0 {
            return;
        }

        let entry = self.counts.entry(size).or_default();

        *entry = entry.saturating_add(count);
    }

    /// Number of packs of `size`; zero when unused.
    pub fn get(&self, size: u64) -> u64 {
        self.counts.get(&size).copied().unwrap_or_default()
    }

    /// Number of distinct pack sizes used.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when no packs are used.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of packs.
    pub fn total_packs(&self) -> u64 {
        self.counts.values().copied().fold(0, u64::saturating_add)
    }

    /// Total number of items across all packs.
    pub fn total_items(&self) -> u64 {
        self.iter()
            .map(|(size, count)| size.saturating_mul(count))
            .fold(0, u64::saturating_add)
    }

    /// `(size, count)` pairs, smallest size first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&size, &count)| (size, count))
    }

    /// `(size, count)` pairs, largest size first, the order used for presentation.
    pub fn iter_descending(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.iter().rev()
    }
}

impl FromIterator<(u64, u64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut breakdown = Self::default();

        for (size, count) in iter {
            breakdown.add(size, count);
        }

        breakdown
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{interrupt::NeverInterrupt, sizes::PackSizes};

    use super::*;

    #[test]
    fn reconstruct_walks_back_to_zero() -> TestResult {
        let sizes = PackSizes::sanitize(&[250, 500, 1_000, 2_000, 5_000]);
        let table = PackTable::build(&sizes, 12_250, &NeverInterrupt)?;

        let breakdown = Breakdown::reconstruct(&table, 12_250)?;

        assert_eq!(breakdown.get(5_000), 2);
        assert_eq!(breakdown.get(2_000), 1);
        assert_eq!(breakdown.get(250), 1);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown.total_items(), 12_250);
        assert_eq!(breakdown.total_packs(), 4);

        Ok(())
    }

    #[test]
    fn reconstruct_of_zero_is_empty() -> TestResult {
        let table = PackTable::build(&PackSizes::sanitize(&[3]), 3, &NeverInterrupt)?;

        assert!(Breakdown::reconstruct(&table, 0)?.is_empty());

        Ok(())
    }

    #[test]
    fn reconstruct_from_unreachable_total_is_an_invariant_violation() -> TestResult {
        let table = PackTable::build(&PackSizes::sanitize(&[3, 5]), 10, &NeverInterrupt)?;

        let result = Breakdown::reconstruct(&table, 7);

        assert!(
            matches!(result, Err(SolverError::InvariantViolation { .. })),
            "expected InvariantViolation, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn add_ignores_zero_counts() {
        let mut breakdown = Breakdown::default();

        breakdown.add(250, 0);
        breakdown.add(500, 2);
        breakdown.add(500, 1);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown.get(500), 3);
        assert_eq!(breakdown.get(250), 0);
    }

    #[test]
    fn iter_descending_lists_largest_size_first() {
        let breakdown: Breakdown = [(250, 1), (5_000, 2), (2_000, 1)].into_iter().collect();

        let sizes: Vec<u64> = breakdown.iter_descending().map(|(size, _)| size).collect();

        assert_eq!(sizes, vec![5_000, 2_000, 250]);
    }

    #[test]
    fn serializes_as_a_plain_map() -> TestResult {
        let breakdown: Breakdown = [(53, 9_429), (31, 7), (23, 2)].into_iter().collect();

        let json = serde_json::to_string(&breakdown)?;

        assert_eq!(json, r#"{"23":2,"31":7,"53":9429}"#);

        Ok(())
    }
}
