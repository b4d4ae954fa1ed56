use std::time::Duration;

/// Configuration for the Redis cache index.
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g. `redis://127.0.0.1:6379`).
    pub url: String,

    /// Prefix applied to every cache key.
    pub prefix: String,

    /// Number of connections in the `deadpool-redis` pool.
    pub pool_size: usize,

    /// Timeout for acquiring a pooled connection.
    pub connection_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            prefix: String::from("stockroom"),
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCacheConfig {
    /// Full Redis key for a cache token: `{prefix}:cache:{key}`.
    pub(crate) fn render_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            format!("cache:{key}")
        } else {
            format!("{}:cache:{key}", self.prefix)
        }
    }
}
