//! Cached pack sizes.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{
    cache::{Cache, keys},
    packs::{PackSizesService, PackSizesServiceError, models::VersionedSizes},
};

/// [`PackSizesService`] decorator that serves the active sizes from a [`Cache`].
///
/// Cache failures are logged and otherwise ignored; storage remains the source of truth.
#[derive(Clone)]
pub struct CachedPackSizesService {
    inner: Arc<dyn PackSizesService>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl std::fmt::Debug for CachedPackSizesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedPackSizesService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CachedPackSizesService {
    #[must_use]
    pub fn new(inner: Arc<dyn PackSizesService>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    async fn cached_sizes(&self, key: &str) -> Option<Vec<u32>> {
        let bytes = match self.cache.get(key).await {
            Ok(bytes) => bytes?,
            Err(error) => {
                warn!(%key, error = %error, "pack list cache read failed");

                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(sizes) => Some(sizes),
            Err(error) => {
                warn!(%key, error = %error, "discarding undecodable cached pack list");

                None
            }
        }
    }

    async fn store_sizes(&self, key: &str, sizes: &[u32]) {
        let bytes = match serde_json::to_vec(sizes) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%key, error = %error, "failed to encode pack list for cache");

                return;
            }
        };

        if let Err(error) = self.cache.set(key, bytes, self.ttl).await {
            warn!(%key, error = %error, "pack list cache write failed");
        }
    }

    async fn invalidate(&self) {
        for prefix in [keys::PACK_LIST_PREFIX, keys::CALCULATION_PREFIX] {
            match self.cache.delete_by_prefix(prefix).await {
                Ok(removed) => debug!(prefix, removed, "invalidated cache entries"),
                Err(error) => warn!(prefix, error = %error, "cache invalidation failed"),
            }
        }
    }
}

#[async_trait]
impl PackSizesService for CachedPackSizesService {
    async fn active_sizes(&self) -> Result<Vec<u32>, PackSizesServiceError> {
        Ok(self.versioned_sizes().await?.sizes)
    }

    async fn versioned_sizes(&self) -> Result<VersionedSizes, PackSizesServiceError> {
        let version = self.inner.current_version().await?;

        if let Some(sizes) = self.cached_sizes(&keys::pack_list(version)).await {
            return Ok(VersionedSizes { version, sizes });
        }

        // Stored under the version read alongside the sizes, which may be newer than `version`.
        let current = self.inner.versioned_sizes().await?;

        self.store_sizes(&keys::pack_list(current.version), &current.sizes)
            .await;

        Ok(current)
    }

    async fn replace_sizes(&self, sizes: Vec<u32>) -> Result<Vec<u32>, PackSizesServiceError> {
        let stored = self.inner.replace_sizes(sizes).await?;

        self.invalidate().await;

        Ok(stored)
    }

    async fn remove_size(&self, size: u32) -> Result<Vec<u32>, PackSizesServiceError> {
        let remaining = self.inner.remove_size(size).await?;

        self.invalidate().await;

        Ok(remaining)
    }

    async fn current_version(&self) -> Result<i64, PackSizesServiceError> {
        self.inner.current_version().await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        cache::{CacheError, MockCache},
        packs::MockPackSizesService,
    };

    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    fn service(inner: MockPackSizesService, cache: MockCache) -> CachedPackSizesService {
        CachedPackSizesService::new(Arc::new(inner), Arc::new(cache), TTL)
    }

    fn versioned(version: i64, sizes: Vec<u32>) -> VersionedSizes {
        VersionedSizes { version, sizes }
    }

    fn backend_error() -> CacheError {
        CacheError::Backend(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )))
    }

    #[tokio::test]
    async fn cache_hit_skips_storage() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner.expect_current_version().returning(|| Ok(4));
        inner.expect_versioned_sizes().never();

        cache
            .expect_get()
            .withf(|key| key == "packlist:v1:4")
            .returning(|_| Ok(Some(b"[23,31,53]".to_vec())));

        let sizes = service(inner, cache).active_sizes().await?;

        assert_eq!(sizes, vec![23, 31, 53]);

        Ok(())
    }

    #[tokio::test]
    async fn cache_miss_reads_storage_and_fills_cache() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner.expect_current_version().returning(|| Ok(1));
        inner
            .expect_versioned_sizes()
            .times(1)
            .returning(|| Ok(versioned(1, vec![250, 500])));

        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, value, ttl| key == "packlist:v1:1" && value == b"[250,500]" && *ttl == TTL)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let sizes = service(inner, cache).active_sizes().await?;

        assert_eq!(sizes, vec![250, 500]);

        Ok(())
    }

    #[tokio::test]
    async fn miss_is_cached_under_the_version_read_with_the_sizes() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner.expect_current_version().returning(|| Ok(4));
        inner
            .expect_versioned_sizes()
            .returning(|| Ok(versioned(5, vec![23, 31])));

        cache
            .expect_get()
            .withf(|key| key == "packlist:v1:4")
            .returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, value, _| key == "packlist:v1:5" && value == b"[23,31]")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let current = service(inner, cache).versioned_sizes().await?;

        assert_eq!(current, versioned(5, vec![23, 31]));

        Ok(())
    }

    #[tokio::test]
    async fn cache_failures_fall_back_to_storage() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner.expect_current_version().returning(|| Ok(1));
        inner
            .expect_versioned_sizes()
            .returning(|| Ok(versioned(1, vec![250])));

        cache.expect_get().returning(|_| Err(backend_error()));
        cache.expect_set().returning(|_, _, _| Err(backend_error()));

        let sizes = service(inner, cache).active_sizes().await?;

        assert_eq!(sizes, vec![250]);

        Ok(())
    }

    #[tokio::test]
    async fn undecodable_entry_is_replaced() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner.expect_current_version().returning(|| Ok(2));
        inner
            .expect_versioned_sizes()
            .returning(|| Ok(versioned(2, vec![500])));

        cache
            .expect_get()
            .returning(|_| Ok(Some(b"not json".to_vec())));
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        assert_eq!(service(inner, cache).active_sizes().await?, vec![500]);

        Ok(())
    }

    #[tokio::test]
    async fn writes_invalidate_pack_lists_and_calculations() -> TestResult {
        let mut inner = MockPackSizesService::new();
        let mut cache = MockCache::new();

        inner
            .expect_replace_sizes()
            .returning(|sizes| Ok(sizes));
        inner.expect_remove_size().returning(|_| Ok(vec![]));

        cache
            .expect_delete_by_prefix()
            .withf(|prefix| prefix == "packlist:v1:")
            .times(2)
            .returning(|_| Ok(1));
        cache
            .expect_delete_by_prefix()
            .withf(|prefix| prefix == "calc:v1:")
            .times(2)
            .returning(|_| Err(backend_error()));

        let service = service(inner, cache);

        assert_eq!(service.replace_sizes(vec![250]).await?, vec![250]);
        assert!(service.remove_size(250).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_are_not_swallowed() {
        let mut inner = MockPackSizesService::new();
        let cache = MockCache::new();

        inner
            .expect_current_version()
            .returning(|| Err(PackSizesServiceError::InvalidData));

        let result = service(inner, cache).active_sizes().await;

        assert!(
            matches!(result, Err(PackSizesServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
