use std::time::Duration;

/// Configuration for the Redis pub/sub event backend.
#[derive(Debug, Clone)]
pub struct RedisEventConfig {
    /// Redis connection URL (e.g. `redis://127.0.0.1:6379`).
    pub url: String,

    /// Number of pooled connections used for publishing.
    pub pool_size: usize,

    /// Timeout for acquiring a pooled connection.
    pub connection_timeout: Duration,
}

impl Default for RedisEventConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            pool_size: 4,
            connection_timeout: Duration::from_secs(5),
        }
    }
}
