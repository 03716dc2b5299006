//! Startup Retry Config

use std::time::Duration;

use clap::Args;

use packopt_app::retry::RetryPolicy;

/// Backoff while waiting for the database and cache at startup.
#[derive(Debug, Args)]
pub struct StartupConfig {
    /// Connection attempts before giving up
    #[arg(long, env = "STARTUP_RETRY_ATTEMPTS", default_value_t = 30_u32)]
    pub startup_retry_attempts: u32,

    /// Wait after the first failed attempt, in milliseconds
    #[arg(long, env = "STARTUP_RETRY_INITIAL_DELAY_MS", default_value_t = 1_000_u64)]
    pub startup_retry_initial_delay_ms: u64,

    /// Longest wait between attempts, in milliseconds
    #[arg(long, env = "STARTUP_RETRY_MAX_DELAY_MS", default_value_t = 10_000_u64)]
    pub startup_retry_max_delay_ms: u64,

    /// Growth factor of the wait between attempts
    #[arg(long, env = "STARTUP_RETRY_MULTIPLIER", default_value_t = 1.5_f64)]
    pub startup_retry_multiplier: f64,
}

impl StartupConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.startup_retry_attempts,
            initial_delay: Duration::from_millis(self.startup_retry_initial_delay_ms),
            max_delay: Duration::from_millis(self.startup_retry_max_delay_ms),
            multiplier: if self.startup_retry_multiplier.is_finite() {
                self.startup_retry_multiplier.max(1.0)
            } else {
                1.0
            },
        }
    }
}
