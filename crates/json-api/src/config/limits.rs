//! Calculation Limits Config

use std::time::Duration;

use clap::Args;

use packopt_app::domain::calculations::models::CalculationLimits;

/// Calculation request bounds.
#[derive(Debug, Args)]
pub struct LimitsConfig {
    /// Largest accepted order amount
    #[arg(long, env = "MAX_AMOUNT", default_value_t = 1_000_000_i64)]
    pub max_amount: i64,

    /// Largest accepted pack size
    #[arg(long, env = "MAX_PACK_SIZE", default_value_t = 10_000_i64)]
    pub max_pack_size: i64,

    /// Time budget for a single calculation, in milliseconds
    #[arg(long, env = "CALCULATION_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub calculation_timeout_ms: u64,
}

impl LimitsConfig {
    #[must_use]
    pub fn calculation_limits(&self) -> CalculationLimits {
        CalculationLimits {
            max_amount: self.max_amount,
            max_pack_size: self.max_pack_size,
            timeout: Duration::from_millis(self.calculation_timeout_ms),
        }
    }
}
