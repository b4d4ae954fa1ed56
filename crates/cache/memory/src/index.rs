use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use stockroom_cache::{CacheError, CacheIndex};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory [`CacheIndex`] backed by a [`DashMap`].
///
/// Expired entries are dropped on read of the same key and swept on every
/// write, so the map never holds more than the live keys plus those expired
/// since the last `set`. Time is measured with the tokio clock, so
/// paused-time tests control expiry.
#[derive(Debug, Default)]
pub struct MemoryCacheIndex {
    data: DashMap<String, Entry>,
}

impl MemoryCacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.data.len();
        self.data.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.data.len())
    }
}

#[async_trait]
impl CacheIndex for MemoryCacheIndex {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.purge_expired();
        self.data.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(entry) = self.data.get(key) {
            if !entry.is_expired() {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.data.remove_if(key, |_, entry| entry.is_expired());
        Ok(None)
    }
}
