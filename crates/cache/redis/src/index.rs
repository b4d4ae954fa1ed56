use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use tracing::instrument;

use stockroom_cache::{CacheError, CacheIndex};

use crate::config::RedisCacheConfig;

/// Redis-backed implementation of [`CacheIndex`].
///
/// Entries are plain strings written with `SET .. PX`, so Redis owns expiry.
pub struct RedisCacheIndex {
    pool: Pool,
    config: RedisCacheConfig,
}

impl std::fmt::Debug for RedisCacheIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheIndex")
            .field("prefix", &self.config.prefix)
            .field("pool_size", &self.config.pool_size)
            .finish_non_exhaustive()
    }
}

impl RedisCacheIndex {
    /// Create a new `RedisCacheIndex` from the provided configuration.
    ///
    /// The pool connects lazily; an unreachable server surfaces on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the pool cannot be created.
    pub fn new(config: RedisCacheConfig) -> Result<Self, CacheError> {
        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map(|b| {
                b.max_size(config.pool_size)
                    .wait_timeout(Some(config.connection_timeout))
                    .runtime(Runtime::Tokio1)
                    .build()
            })
            .map_err(|e| CacheError::Connection(e.to_string()))?
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { pool, config })
    }

    async fn conn(&self) -> Result<deadpool_redis::Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CacheIndex for RedisCacheIndex {
    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let redis_key = self.config.render_key(key);
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let mut conn = self.conn().await?;
        let () = conn
            .pset_ex(&redis_key, value, ttl_ms)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let redis_key = self.config.render_key(key);
        let mut conn = self.conn().await?;
        conn.get(&redis_key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}
