//! Calculations service errors.

use packopt::SolverError;
use thiserror::Error;
use tokio::task::JoinError;

use crate::domain::packs::PackSizesServiceError;

/// Calculations service error variants.
#[derive(Debug, Error)]
pub enum CalculationsServiceError {
    /// The amount is zero or negative.
    #[error("amount must be a positive integer")]
    NonPositiveAmount,

    /// The amount exceeds the configured maximum.
    #[error("amount must not exceed {max}")]
    AmountTooLarge {
        /// Configured maximum.
        max: i64,
    },

    /// A custom pack size is outside `1..=max`.
    #[error("pack size {size} must be between 1 and {max}")]
    InvalidPackSize {
        /// Rejected size.
        size: i64,

        /// Configured maximum.
        max: i64,
    },

    /// No pack sizes were supplied and none are configured.
    #[error("no pack sizes configured")]
    NoPackSizes,

    /// The solver did not finish within the configured timeout.
    #[error("calculation timed out")]
    TimedOut,

    /// Reading the configured pack sizes failed.
    #[error("failed to load pack sizes")]
    PackSizes(#[from] PackSizesServiceError),

    /// The solver reported an error.
    #[error("solver failed")]
    Solver(#[from] SolverError),

    /// The blocking worker panicked or was cancelled.
    #[error("solver worker failed")]
    Worker(#[from] JoinError),
}

impl CalculationsServiceError {
    /// Returns `true` when the request itself was at fault.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveAmount
                | Self::AmountTooLarge { .. }
                | Self::InvalidPackSize { .. }
                | Self::NoPackSizes
        )
    }
}
