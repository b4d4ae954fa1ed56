use async_trait::async_trait;

use stockroom_core::{NewProduct, Product, ProductId};

use crate::error::MetadataError;

/// Trait for persisting product rows.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Rows are ordered by id, which doubles as insertion order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return it with its assigned id and timestamps.
    ///
    /// Ids are non-zero and strictly increasing.
    async fn insert(&self, product: NewProduct) -> Result<Product, MetadataError>;

    /// Return at most `limit` rows starting at `offset`, in id order.
    ///
    /// An offset past the end yields an empty vector.
    async fn scan(&self, offset: u64, limit: u64) -> Result<Vec<Product>, MetadataError>;

    /// Fetch a row by id. Returns `None` if absent.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, MetadataError>;

    /// Delete a row by id. Returns `true` if the row existed.
    async fn delete(&self, id: ProductId) -> Result<bool, MetadataError>;

    /// Release pooled connections. Called once at shutdown.
    async fn close(&self) {}
}
