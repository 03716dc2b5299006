//! Cache
//!
//! A byte-oriented key/value port used to keep pack lists and calculation results close to
//! the API. Keys embed the pack set version, so a write only needs to drop stale prefixes.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;

pub mod errors;
pub mod keys;
mod noop;
mod packs;
mod redis_cache;

pub use errors::CacheError;
pub use noop::NoopCache;
pub use packs::CachedPackSizesService;
pub use redis_cache::RedisCache;

#[automock]
#[async_trait]
/// Key/value cache operations.
pub trait Cache: Send + Sync {
    /// Fetch the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove every key starting with `prefix`, returning how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError>;
}
