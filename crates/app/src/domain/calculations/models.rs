//! Calculation Models

use std::time::Duration;

/// A request to pack `amount` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    /// Number of items ordered.
    pub amount: i64,

    /// Pack sizes to use instead of the configured ones.
    ///
    /// `None` or an empty list selects the active configuration.
    pub sizes: Option<Vec<i64>>,
}

impl CalculationRequest {
    /// Request against the active pack sizes.
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            sizes: None,
        }
    }

    /// Request against a one-off set of pack sizes.
    pub fn with_sizes(amount: i64, sizes: Vec<i64>) -> Self {
        Self {
            amount,
            sizes: Some(sizes),
        }
    }

    /// Custom sizes, when any were supplied.
    pub fn custom_sizes(&self) -> Option<&[i64]> {
        self.sizes.as_deref().filter(|sizes| !sizes.is_empty())
    }
}

/// Bounds enforced before a request reaches the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationLimits {
    /// Largest accepted amount.
    pub max_amount: i64,

    /// Largest accepted pack size.
    pub max_pack_size: i64,

    /// Wall-clock budget for a single solve.
    pub timeout: Duration,
}

impl Default for CalculationLimits {
    fn default() -> Self {
        Self {
            max_amount: 1_000_000,
            max_pack_size: 10_000,
            timeout: Duration::from_secs(5),
        }
    }
}
