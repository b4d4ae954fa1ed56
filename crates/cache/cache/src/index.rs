use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Key/value index with per-entry expiry.
///
/// Entries are never refreshed on read. Once `ttl` has elapsed since the last
/// `set`, `get` returns `None`.
#[async_trait]
pub trait CacheIndex: Send + Sync {
    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Get the live value for `key`. Returns `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
}
