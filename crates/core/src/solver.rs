//! Pack Solver

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    breakdown::Breakdown,
    interrupt::{Interrupt, NeverInterrupt},
    sizes::PackSizes,
    table::PackTable,
};

/// Solver Errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The caller asked the solver to stop before it finished.
    #[error("solver was interrupted before completion")]
    Interrupted,

    /// The search ceiling cannot be addressed on this platform.
    #[error("search ceiling {ceiling} exceeds addressable table size")]
    CeilingOverflow {
        /// Requested ceiling (`amount + largest size - 1`), saturated at `u64::MAX`.
        ceiling: u64,
    },

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// The packs chosen to fulfil an amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    total_items: u64,
    total_packs: u64,
    breakdown: Breakdown,
}

impl Allocation {
    /// The allocation for degenerate input: nothing shipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of items across all chosen packs.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total number of packs chosen.
    pub fn total_packs(&self) -> u64 {
        self.total_packs
    }

    /// Packs per size.
    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    /// Consume the allocation, returning its breakdown.
    pub fn into_breakdown(self) -> Breakdown {
        self.breakdown
    }

    fn from_breakdown(total_items: u64, breakdown: Breakdown) -> Self {
        Self {
            total_items,
            total_packs: breakdown.total_packs(),
            breakdown,
        }
    }
}

/// Find the pack combination that minimises overage first and pack count second.
///
/// `amount <= 0`, or a size list with no positive entries, yields [`Allocation::empty`].
/// Non-positive and duplicate sizes are ignored.
///
/// # Errors
///
/// Returns [`SolverError::CeilingOverflow`] when `amount + largest size` cannot be tabled on
/// this platform, and [`SolverError::InvariantViolation`] if the table turns out to be
/// inconsistent.
pub fn compute(amount: i64, sizes: &[i64]) -> Result<Allocation, SolverError> {
    compute_with(amount, sizes, &NeverInterrupt)
}

/// [`compute`], polling `interrupt` between table rows.
///
/// # Errors
///
/// As [`compute`], plus [`SolverError::Interrupted`] once `interrupt` fires.
pub fn compute_with(
    amount: i64,
    sizes: &[i64],
    interrupt: &impl Interrupt,
) -> Result<Allocation, SolverError> {
    let Ok(amount) = u64::try_from(amount) else {
        return Ok(Allocation::empty());
    };

    let sizes = PackSizes::sanitize(sizes);

    let Some(largest) = sizes.largest() else {
        return Ok(Allocation::empty());
    };

    if amount == 0 {
        return Ok(Allocation::empty());
    }

    // Any optimum overshoots by less than one largest pack.
    let ceiling = amount
        .checked_add(largest - 1)
        .ok_or(SolverError::CeilingOverflow { ceiling: u64::MAX })?;

    let table = PackTable::build(&sizes, ceiling, interrupt)?;

    let total = table
        .select(amount)
        .ok_or(SolverError::InvariantViolation {
            message: "no reachable total between amount and search ceiling",
        })?;

    let breakdown = Breakdown::reconstruct(&table, total)?;

    Ok(Allocation::from_breakdown(total, breakdown))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use testresult::TestResult;

    use super::*;

    const STANDARD: [i64; 5] = [250, 500, 1_000, 2_000, 5_000];

    #[test]
    fn amount_of_one_uses_smallest_pack() -> TestResult {
        let allocation = compute(1, &STANDARD)?;

        assert_eq!(allocation.total_items(), 250);
        assert_eq!(allocation.total_packs(), 1);
        assert_eq!(allocation.breakdown().get(250), 1);

        Ok(())
    }

    #[test]
    fn zero_and_negative_amounts_are_empty() -> TestResult {
        assert_eq!(compute(0, &STANDARD)?, Allocation::empty());
        assert_eq!(compute(-1, &STANDARD)?, Allocation::empty());
        assert_eq!(compute(i64::MIN, &STANDARD)?, Allocation::empty());

        Ok(())
    }

    #[test]
    fn no_usable_sizes_is_empty() -> TestResult {
        assert_eq!(compute(100, &[])?, Allocation::empty());
        assert_eq!(compute(100, &[0, -250])?, Allocation::empty());

        Ok(())
    }

    #[test]
    fn ceiling_overflow_is_reported() {
        let result = compute(i64::MAX, &[i64::MAX]);

        assert!(
            matches!(result, Err(SolverError::CeilingOverflow { .. })),
            "expected CeilingOverflow, got {result:?}"
        );
    }

    #[test]
    fn interrupted_computation_returns_error() {
        let result = compute_with(1_000, &[1], &AtomicBool::new(true));

        assert_eq!(result, Err(SolverError::Interrupted));
    }

    #[test]
    fn single_size_rounds_up_to_a_multiple() -> TestResult {
        let allocation = compute(263, &[250])?;

        assert_eq!(allocation.total_items(), 500);
        assert_eq!(allocation.breakdown().get(250), 2);

        Ok(())
    }

    #[test]
    fn into_breakdown_hands_back_the_counts() -> TestResult {
        let breakdown = compute(750, &[250, 500])?.into_breakdown();

        assert_eq!(breakdown.get(500), 1);
        assert_eq!(breakdown.get(250), 1);

        Ok(())
    }
}
