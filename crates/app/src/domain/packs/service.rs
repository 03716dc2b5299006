//! Pack sizes service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::packs::{
        errors::PackSizesServiceError,
        models::{PackSet, VersionedSizes, normalize},
        repository::PgPackSetsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPackSizesService {
    db: Db,
    repository: PgPackSetsRepository,
}

impl PgPackSizesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPackSetsRepository::new(),
        }
    }
}

#[async_trait]
impl PackSizesService for PgPackSizesService {
    async fn active_sizes(&self) -> Result<Vec<u32>, PackSizesServiceError> {
        Ok(self.versioned_sizes().await?.sizes)
    }

    async fn versioned_sizes(&self) -> Result<VersionedSizes, PackSizesServiceError> {
        let mut tx = self.db.begin().await?;

        let latest = self.repository.latest_pack_set(&mut tx).await?;

        tx.commit().await?;

        Ok(latest.map(VersionedSizes::from).unwrap_or_default())
    }

    #[tracing::instrument(
        name = "packs.service.replace_sizes",
        skip(self, sizes),
        fields(version = tracing::field::Empty),
        err
    )]
    async fn replace_sizes(&self, sizes: Vec<u32>) -> Result<Vec<u32>, PackSizesServiceError> {
        let sizes = normalize(sizes);

        let mut tx = self.db.begin().await?;

        self.repository.lock(&mut tx).await?;

        let created = self.repository.create_pack_set(&mut tx, &sizes).await?;

        tx.commit().await?;

        tracing::Span::current().record("version", created.version);

        info!(version = created.version, sizes = ?created.sizes, "replaced pack sizes");

        Ok(created.sizes)
    }

    #[tracing::instrument(name = "packs.service.remove_size", skip(self), err)]
    async fn remove_size(&self, size: u32) -> Result<Vec<u32>, PackSizesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock(&mut tx).await?;

        let current = self
            .repository
            .latest_pack_set(&mut tx)
            .await?
            .map(|set| set.sizes)
            .unwrap_or_default();

        if !current.contains(&size) {
            tx.commit().await?;

            return Ok(current);
        }

        let remaining: Vec<u32> = current.into_iter().filter(|&kept| kept != size).collect();

        let PackSet { version, sizes, .. } =
            self.repository.create_pack_set(&mut tx, &remaining).await?;

        tx.commit().await?;

        info!(version, size, "removed pack size");

        Ok(sizes)
    }

    async fn current_version(&self) -> Result<i64, PackSizesServiceError> {
        let mut tx = self.db.begin().await?;

        let version = self.repository.current_version(&mut tx).await?;

        tx.commit().await?;

        Ok(version)
    }
}

#[automock]
#[async_trait]
/// Versioned pack size configuration.
pub trait PackSizesService: Send + Sync {
    /// Sizes in the latest version, ascending; empty when nothing is configured.
    async fn active_sizes(&self) -> Result<Vec<u32>, PackSizesServiceError>;

    /// Active sizes and their version, read together.
    async fn versioned_sizes(&self) -> Result<VersionedSizes, PackSizesServiceError>;

    /// Store a new version holding `sizes`, normalised. Returns the stored sizes.
    async fn replace_sizes(&self, sizes: Vec<u32>) -> Result<Vec<u32>, PackSizesServiceError>;

    /// Store a new version without `size`.
    ///
    /// When `size` is not configured nothing is written and the current sizes are returned.
    async fn remove_size(&self, size: u32) -> Result<Vec<u32>, PackSizesServiceError>;

    /// Latest version number, or `0` when nothing has been stored.
    async fn current_version(&self) -> Result<i64, PackSizesServiceError>;
}
