//! Pack sizes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Pack sizes service error variants.
#[derive(Debug, Error)]
pub enum PackSizesServiceError {
    /// A stored or submitted size is outside the supported range.
    #[error("invalid pack size")]
    InvalidData,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PackSizesServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_storage_errors() {
        for error in [Error::RowNotFound, Error::PoolTimedOut] {
            let mapped = PackSizesServiceError::from(error);

            assert!(
                matches!(mapped, PackSizesServiceError::Sql(_)),
                "expected Sql, got {mapped:?}"
            );
        }
    }
}
