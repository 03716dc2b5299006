//! Redis-backed cache.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};

use crate::domain::cache::{Cache, CacheError};

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Cache stored in Redis through a reconnecting connection manager.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connect to the Redis server at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid or the server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let manager = Client::open(url)?.get_connection_manager().await?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.manager.clone();

        let value: Option<Vec<u8>> = conn.get(key).await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();

        // Redis rejects a zero expiry.
        let () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;

        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let mut conn = self.manager.clone();
        let pattern = scan_pattern(prefix);

        let mut cursor = 0_u64;
        let mut removed = 0_u64;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let deleted: u64 = conn.del(keys.as_slice()).await?;

                removed = removed.saturating_add(deleted);
            }

            if next == 0 {
                break;
            }

            cursor = next;
        }

        Ok(removed)
    }
}

/// `SCAN MATCH` pattern for every key beginning with `prefix`.
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);

    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('*');

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_pattern_matches_everything_under_prefix() {
        assert_eq!(scan_pattern("calc:v1:"), "calc:v1:*");
    }

    #[test]
    fn scan_pattern_escapes_glob_characters() {
        assert_eq!(scan_pattern("a*b?[c]"), r"a\*b\?\[c\]*");
    }
}
