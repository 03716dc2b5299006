//! App Context

use std::{sync::Arc, time::Duration};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    database::{self, Db},
    domain::{
        cache::{Cache, CachedPackSizesService, NoopCache, RedisCache},
        calculations::{CalculationsService, PackCalculationsService, models::CalculationLimits},
        packs::{PackSizesService, PgPackSizesService},
    },
    retry::{RetryPolicy, retry},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Settings needed to assemble the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// `PostgreSQL` connection string.
    pub database_url: String,

    /// Redis connection string; caching is disabled when absent.
    pub redis_url: Option<String>,

    /// Lifetime of cached pack lists and calculations.
    pub cache_ttl: Duration,

    /// Request bounds for calculations.
    pub limits: CalculationLimits,

    /// Backoff applied while the database and cache come up.
    pub connect_retry: RetryPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub packs: Arc<dyn PackSizesService>,
    pub calculations: Arc<dyn CalculationsService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// Both connections are retried according to `connect_retry`. A cache that still cannot be
    /// reached is logged and replaced by [`NoopCache`].
    ///
    /// # Errors
    ///
    /// Returns an error when the database stays unreachable or migrating it fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = retry(&settings.connect_retry, "database connection", || {
            database::connect(&settings.database_url)
        })
        .await
        .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let cache = connect_cache(settings.redis_url.as_deref(), &settings.connect_retry).await;

        Ok(Self::from_parts(
            Arc::new(PgPackSizesService::new(Db::new(pool))),
            cache,
            settings.limits,
            settings.cache_ttl,
        ))
    }

    /// Wire services around an existing pack size store and cache.
    pub fn from_parts(
        store: Arc<dyn PackSizesService>,
        cache: Arc<dyn Cache>,
        limits: CalculationLimits,
        cache_ttl: Duration,
    ) -> Self {
        let packs: Arc<dyn PackSizesService> = Arc::new(CachedPackSizesService::new(
            store,
            Arc::clone(&cache),
            cache_ttl,
        ));

        Self {
            calculations: Arc::new(PackCalculationsService::new(
                Arc::clone(&packs),
                cache,
                limits,
                cache_ttl,
            )),
            packs,
        }
    }
}

async fn connect_cache(url: Option<&str>, policy: &RetryPolicy) -> Arc<dyn Cache> {
    let Some(url) = url else {
        info!("no cache configured");

        return Arc::new(NoopCache);
    };

    match retry(policy, "redis connection", || RedisCache::connect(url)).await {
        Ok(cache) => {
            info!("connected to redis cache");

            Arc::new(cache)
        }
        Err(error) => {
            warn!(error = %error, "redis unreachable after retrying, continuing without cache");

            Arc::new(NoopCache)
        }
    }
}
