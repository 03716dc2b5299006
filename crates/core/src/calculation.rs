//! Calculation
//!
//! The caller-facing view of an [`Allocation`]: the requested amount alongside what ships and
//! how much of it is surplus.

use serde::{Deserialize, Serialize};

use crate::{
    breakdown::Breakdown,
    interrupt::{Interrupt, NeverInterrupt},
    solver::{Allocation, SolverError, compute_with},
};

/// A solved order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Quantity requested.
    pub amount: i64,

    /// Items shipped.
    pub total_items: u64,

    /// Surplus items shipped beyond `amount`.
    ///
    /// Zero whenever nothing ships, including for non-positive amounts.
    pub overage: u64,

    /// Packs shipped.
    pub total_packs: u64,

    /// Packs per size.
    pub breakdown: Breakdown,
}

impl Calculation {
    /// Wrap an allocation solved for `amount`.
    pub fn new(amount: i64, allocation: Allocation) -> Self {
        let total_items = allocation.total_items();
        let total_packs = allocation.total_packs();
        let requested = u64::try_from(amount).unwrap_or_default();

        Self {
            amount,
            total_items,
            overage: total_items.saturating_sub(requested),
            total_packs,
            breakdown: allocation.into_breakdown(),
        }
    }

    /// Solve `amount` against `sizes`.
    ///
    /// # Errors
    ///
    /// See [`compute`](crate::compute).
    pub fn solve(amount: i64, sizes: &[i64]) -> Result<Self, SolverError> {
        Self::solve_with(amount, sizes, &NeverInterrupt)
    }

    /// Solve `amount` against `sizes`, polling `interrupt`.
    ///
    /// # Errors
    ///
    /// See [`compute_with`].
    pub fn solve_with(
        amount: i64,
        sizes: &[i64],
        interrupt: &impl Interrupt,
    ) -> Result<Self, SolverError> {
        compute_with(amount, sizes, interrupt).map(|allocation| Self::new(amount, allocation))
    }

    /// Returns `true` when nothing ships.
    pub fn is_empty(&self) -> bool {
        self.total_packs == 0
    }
}
