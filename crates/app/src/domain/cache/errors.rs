//! Cache errors.

use thiserror::Error;

/// Cache error variants.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache backend rejected or failed a command.
    #[error("cache backend error")]
    Backend(#[source] redis::RedisError),
}

impl From<redis::RedisError> for CacheError {
    fn from(error: redis::RedisError) -> Self {
        Self::Backend(error)
    }
}
