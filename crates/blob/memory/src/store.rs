use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use stockroom_blob::{BlobError, BlobObject, BlobStore};

/// A stored object.
#[derive(Debug, Clone)]
struct Entry {
    content_type: String,
    data: Bytes,
}

/// In-memory [`BlobStore`] backed by a [`DashMap`].
///
/// Intended for tests and single-process development. Contents are lost when
/// the store is dropped.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: DashMap<String, Entry>,
}

impl MemoryBlobStore {
    /// Create an empty store whose durable references start with
    /// `memory://stockroom`.
    pub fn new() -> Self {
        Self::with_base_url("memory://stockroom")
    }

    /// Create an empty store with a custom reference base.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: DashMap::new(),
        }
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), BlobError> {
        self.objects.insert(
            key.to_owned(),
            Entry {
                content_type: content_type.to_owned(),
                data,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<BlobObject, BlobError> {
        let entry = self
            .objects
            .get(key)
            .map(|e| e.value().clone())
            .ok_or_else(|| BlobError::NotFound(key.to_owned()))?;
        Ok(BlobObject::from_bytes(entry.content_type, entry.data))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        self.objects.remove(key);
        Ok(())
    }
}
