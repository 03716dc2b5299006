//! Reachability Table
//!
//! A dense table indexed by item total. Each cell records whether the total can be made from
//! whole packs, the fewest packs that do it, and the size of the last pack applied on that
//! optimal path so the solution can be walked back without recursion.

use smallvec::SmallVec;

use crate::{interrupt::Interrupt, sizes::PackSizes, solver::SolverError};

/// State of a single item total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// No multiset of the pack sizes sums to this total.
    Unreachable,

    /// The empty multiset: total `0`, zero packs.
    Origin,

    /// Reachable with `packs` packs, the last of which has size `size`.
    Reachable {
        /// Minimum number of packs summing to this total.
        packs: u64,

        /// Pack size applied last on the optimal path to this total.
        size: u64,
    },
}

impl Reachability {
    /// Minimum pack count, or `None` when unreachable.
    #[inline]
    pub fn packs(self) -> Option<u64> {
        match self {
            Self::Unreachable => None,
            Self::Origin => Some(0),
            Self::Reachable { packs, .. } => Some(packs),
        }
    }

    /// Returns `true` unless the total is unreachable.
    #[inline]
    pub fn is_reachable(self) -> bool {
        !matches!(self, Self::Unreachable)
    }
}

/// Dynamic-programming table over item totals `0..=ceiling`.
#[derive(Debug, Clone)]
pub struct PackTable {
    cells: Vec<Reachability>,
}

impl PackTable {
    /// Fill the table for every total from `0` to `ceiling` inclusive.
    ///
    /// Sizes are tried in ascending order and a cell is only replaced on a strictly smaller
    /// pack count, so when several sizes tie the smallest one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Interrupted`] as soon as `interrupt` fires, and
    /// [`SolverError::CeilingOverflow`] when the table cannot be addressed or allocated.
    pub fn build(
        sizes: &PackSizes,
        ceiling: u64,
        interrupt: &impl Interrupt,
    ) -> Result<Self, SolverError> {
        let overflow = || SolverError::CeilingOverflow { ceiling };

        let ceiling_index = usize::try_from(ceiling).map_err(|_source| overflow())?;
        let capacity = ceiling_index.checked_add(1).ok_or_else(overflow)?;

        let steps: SmallVec<[(usize, u64); 8]> = sizes
            .iter()
            .filter_map(|size| usize::try_from(size).ok().map(|step| (step, size)))
            .collect();

        let mut cells = Vec::new();

        cells
            .try_reserve_exact(capacity)
            .map_err(|_source| overflow())?;

        cells.push(Reachability::Origin);

        for total in 1..=ceiling_index {
            if interrupt.is_interrupted() {
                return Err(SolverError::Interrupted);
            }

            let mut best = Reachability::Unreachable;

            for &(step, size) in &steps {
                // Sizes are ascending: once one overshoots, the rest do too.
                let Some(remainder) = total.checked_sub(step) else {
                    break;
                };

                let Some(packs) = cells.get(remainder).copied().and_then(Reachability::packs) else {
                    continue;
                };

                let candidate = packs.saturating_add(1);

                if best.packs().is_none_or(|current| candidate < current) {
                    best = Reachability::Reachable {
                        packs: candidate,
                        size,
                    };
                }
            }

            cells.push(best);
        }

        Ok(Self { cells })
    }

    /// Highest item total covered by the table.
    pub fn ceiling(&self) -> u64 {
        self.cells
            .len()
            .checked_sub(1)
            .and_then(|last| u64::try_from(last).ok())
            .unwrap_or_default()
    }

    /// State of a single total, or `None` beyond the ceiling.
    pub fn get(&self, total: u64) -> Option<Reachability> {
        let index = usize::try_from(total).ok()?;

        self.cells.get(index).copied()
    }

    /// Smallest reachable total that is at least `amount`.
    ///
    /// Scanning upwards from `amount` means the first hit carries the least possible overage;
    /// pack counts of different totals are never compared.
    pub fn select(&self, amount: u64) -> Option<u64> {
        let start = usize::try_from(amount).ok()?;

        self.cells
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, cell)| cell.is_reachable())
            .and_then(|(total, _)| u64::try_from(total).ok())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use testresult::TestResult;

    use crate::interrupt::NeverInterrupt;

    use super::*;

    fn table(sizes: &[i64], ceiling: u64) -> Result<PackTable, SolverError> {
        PackTable::build(&PackSizes::sanitize(sizes), ceiling, &NeverInterrupt)
    }

    #[test]
    fn origin_is_the_only_zero_pack_cell() -> TestResult {
        let table = table(&[3, 5], 10)?;

        assert_eq!(table.get(0), Some(Reachability::Origin));
        assert_eq!(table.ceiling(), 10);

        for total in 1..=10 {
            assert_ne!(table.get(total).and_then(Reachability::packs), Some(0));
        }

        Ok(())
    }

    #[test]
    fn gaps_stay_unreachable() -> TestResult {
        let table = table(&[3, 5], 10)?;

        for total in [1, 2, 4, 7] {
            assert_eq!(
                table.get(total),
                Some(Reachability::Unreachable),
                "{total} should not be reachable from 3 and 5"
            );
        }

        assert_eq!(
            table.get(8),
            Some(Reachability::Reachable { packs: 2, size: 3 })
        );
        assert_eq!(
            table.get(10),
            Some(Reachability::Reachable { packs: 2, size: 5 })
        );

        Ok(())
    }

    #[test]
    fn ties_keep_the_smallest_size() -> TestResult {
        // 54 = 23 + 31 either way round; ascending iteration records 23 last.
        let table = table(&[23, 31, 53], 60)?;

        assert_eq!(
            table.get(54),
            Some(Reachability::Reachable { packs: 2, size: 23 })
        );

        Ok(())
    }

    #[test]
    fn fewer_packs_beats_smaller_size() -> TestResult {
        let table = table(&[500, 1_000], 1_000)?;

        assert_eq!(
            table.get(1_000),
            Some(Reachability::Reachable {
                packs: 1,
                size: 1_000
            })
        );

        Ok(())
    }

    #[test]
    fn select_returns_first_reachable_total_at_or_above_amount() -> TestResult {
        let table = table(&[250, 500], 750)?;

        assert_eq!(table.select(1), Some(250));
        assert_eq!(table.select(250), Some(250));
        assert_eq!(table.select(251), Some(500));
        assert_eq!(table.select(501), Some(750));

        Ok(())
    }

    #[test]
    fn select_beyond_ceiling_finds_nothing() -> TestResult {
        let table = table(&[250], 300)?;

        assert_eq!(table.select(301), None);
        assert_eq!(table.get(301), None);

        Ok(())
    }

    #[test]
    fn raised_interrupt_stops_the_build() {
        let result = PackTable::build(&PackSizes::sanitize(&[1]), 1_000, &AtomicBool::new(true));

        assert!(
            matches!(result, Err(SolverError::Interrupted)),
            "expected Interrupted, got {result:?}"
        );
    }
}
