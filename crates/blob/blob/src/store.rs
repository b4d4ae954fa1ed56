use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::object::BlobObject;

/// Pluggable object storage for product images.
///
/// Keys are flat strings inside a single bucket chosen by the implementation.
/// Writing to an existing key replaces the previous object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Public base of every durable reference, `endpoint/bucket`.
    fn base_url(&self) -> String;

    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), BlobError>;

    /// Fetch the object under `key`.
    ///
    /// Returns [`BlobError::NotFound`] if there is no such object.
    async fn get(&self, key: &str) -> Result<BlobObject, BlobError>;

    /// Remove the object under `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Durable reference for `key`: `endpoint/bucket/key`.
    fn durable_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url().trim_end_matches('/'))
    }
}
