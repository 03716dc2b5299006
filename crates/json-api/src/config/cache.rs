//! Cache Config

use clap::Args;

/// Cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Redis connection string; caching is disabled when unset
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    pub redis_url: Option<String>,

    /// Lifetime of cached pack lists and calculations, in seconds
    #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = 600_u64)]
    pub cache_ttl_seconds: u64,
}
