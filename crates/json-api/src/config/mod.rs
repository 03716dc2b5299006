//! Server configuration module

use std::time::Duration;

use clap::Parser;

use packopt_app::context::AppSettings;

use crate::config::{
    cache::CacheConfig,
    db::DatabaseConfig,
    limits::LimitsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    security::SecurityConfig,
    server::ServerRuntimeConfig,
    startup::StartupConfig,
};

pub(crate) mod cache;
pub(crate) mod db;
pub(crate) mod limits;
pub(crate) mod observability;
pub(crate) mod security;
pub(crate) mod server;
pub(crate) mod startup;

/// Packopt JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "packopt-json", about = "Packopt JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Cache settings.
    #[command(flatten)]
    pub cache: CacheConfig,

    /// Calculation request bounds.
    #[command(flatten)]
    pub limits: LimitsConfig,

    /// CORS, rate limiting and body size settings.
    #[command(flatten)]
    pub security: SecurityConfig,

    /// Connection retry settings.
    #[command(flatten)]
    pub startup: StartupConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for assembling the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            redis_url: self
                .cache
                .redis_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            cache_ttl: Duration::from_secs(self.cache.cache_ttl_seconds),
            limits: self.limits.calculation_limits(),
            connect_retry: self.startup.retry_policy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use packopt_app::{domain::calculations::models::CalculationLimits, retry::RetryPolicy};

    use super::*;

    #[test]
    fn defaults_match_documented_values() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "packopt-json",
            "--database-url",
            "postgres://localhost/packopt",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.shutdown_timeout(), Duration::from_secs(10));
        assert!(!config.observability.otel_enabled);
        assert!(config.security.rate_limit_enabled);
        assert_eq!(config.security.rate_limit_rpm, 100);
        assert_eq!(config.security.max_request_size, 10 * 1024 * 1024);

        let settings = config.app_settings();

        assert_eq!(settings.redis_url, None);
        assert_eq!(settings.cache_ttl, Duration::from_secs(600));
        assert_eq!(settings.limits, CalculationLimits::default());
        assert_eq!(settings.connect_retry, RetryPolicy::default());

        Ok(())
    }

    #[test]
    fn startup_retry_can_be_tuned() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "packopt-json",
            "--database-url",
            "postgres://localhost/packopt",
            "--startup-retry-attempts",
            "3",
            "--startup-retry-initial-delay-ms",
            "50",
            "--startup-retry-multiplier",
            "0.5",
        ])?;

        let policy = config.app_settings().connect_retry;

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(50));
        assert_eq!(policy.max_delay, Duration::from_secs(10));
        assert!(
            (policy.multiplier - 1.0).abs() < f64::EPSILON,
            "shrinking multipliers are raised to 1"
        );

        Ok(())
    }

    #[test]
    fn blank_redis_url_disables_cache() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "packopt-json",
            "--database-url",
            "postgres://localhost/packopt",
            "--redis-url",
            " ",
        ])?;

        assert_eq!(config.app_settings().redis_url, None);

        Ok(())
    }
}
