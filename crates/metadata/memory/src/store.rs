use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use stockroom_core::{NewProduct, Product, ProductId};
use stockroom_metadata::{MetadataError, ProductStore};

/// In-memory [`ProductStore`] keyed by id.
///
/// A `BTreeMap` keeps rows in id order so scans match insertion order.
/// Ids come from a counter and are never reused, even after deletes.
#[derive(Debug)]
pub struct MemoryProductStore {
    rows: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl MemoryProductStore {
    /// Create a new, empty store whose first id is `1`.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, MetadataError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let row = Product {
            id,
            name: product.name,
            photo_key: product.photo_key,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().insert(id, row.clone());
        Ok(row)
    }

    async fn scan(&self, offset: u64, limit: u64) -> Result<Vec<Product>, MetadataError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .rows
            .read()
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, MetadataError> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn delete(&self, id: ProductId) -> Result<bool, MetadataError> {
        Ok(self.rows.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_metadata::testing::run_product_store_conformance_tests;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryProductStore::new();
        run_product_store_conformance_tests(&store).await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryProductStore::new();
        let first = store.insert(NewProduct::new("A", "a.png")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        let second = store.insert(NewProduct::new("B", "b.png")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn scan_skips_deleted_rows() {
        let store = MemoryProductStore::new();
        for name in ["A", "B", "C"] {
            store.insert(NewProduct::new(name, "x.png")).await.unwrap();
        }
        store.delete(2).await.unwrap();
        let names: Vec<_> = store
            .scan(0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["A", "C"]);
    }
}
