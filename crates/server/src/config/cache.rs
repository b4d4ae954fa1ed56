use serde::Deserialize;

/// Configuration for the cache index that resolves cache tokens.
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    /// Which backend to use: `"memory"` or `"redis"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Connection URL for the Redis backend.
    pub url: Option<String>,
    /// Key prefix for the Redis backend.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Number of pooled Redis connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// How long a cache token stays resolvable after creation.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            prefix: default_prefix(),
            pool_size: default_pool_size(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

fn default_prefix() -> String {
    "stockroom".to_owned()
}

fn default_pool_size() -> usize {
    10
}

fn default_ttl_seconds() -> u64 {
    60
}
