//! Pack Sets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::packs::models::PackSet;

const LATEST_PACK_SET_SQL: &str = include_str!("sql/latest_pack_set.sql");
const CREATE_PACK_SET_SQL: &str = include_str!("sql/create_pack_set.sql");
const CURRENT_VERSION_SQL: &str = include_str!("sql/current_version.sql");
const LOCK_PACK_SETS_SQL: &str = include_str!("sql/lock_pack_sets.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPackSetsRepository;

impl PgPackSetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn latest_pack_set(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<PackSet>, sqlx::Error> {
        query_as::<Postgres, PackSet>(LATEST_PACK_SET_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_pack_set(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sizes: &[u32],
    ) -> Result<PackSet, sqlx::Error> {
        let sizes = sizes
            .iter()
            .map(|&size| i32::try_from(size))
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|error| sqlx::Error::Encode(Box::new(error)))?;

        query_as::<Postgres, PackSet>(CREATE_PACK_SET_SQL)
            .bind(sizes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn current_version(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(CURRENT_VERSION_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    /// Serialise writers so each new version is derived from the one before it.
    pub(crate) async fn lock(&self, tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        query(LOCK_PACK_SETS_SQL).execute(&mut **tx).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for PackSet {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let sizes = row
            .try_get::<Vec<i32>, _>("sizes")?
            .into_iter()
            .map(u32::try_from)
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "sizes".to_string(),
                source: Box::new(error),
            })?;

        Ok(Self {
            version: row.try_get("version")?,
            sizes,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
