//! Security Config

use clap::Args;

/// CORS, rate limiting and request size settings.
#[derive(Debug, Args)]
pub struct SecurityConfig {
    /// Allowed CORS origin; `*` allows any
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Enable per-client rate limiting.
    #[arg(long, env = "RATE_LIMIT_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub rate_limit_enabled: bool,

    /// Requests allowed per client per minute
    #[arg(long, env = "RATE_LIMIT_RPM", default_value_t = 100_u64)]
    pub rate_limit_rpm: u64,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_REQUEST_SIZE", default_value_t = 10 * 1024 * 1024)]
    pub max_request_size: u64,
}
