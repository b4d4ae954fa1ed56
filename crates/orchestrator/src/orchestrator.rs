use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, instrument, warn};

use stockroom_blob::{BlobBody, BlobStore};
use stockroom_cache::CacheIndex;
use stockroom_core::{CreateProductRequest, NewProduct, Pagination, Product, ProductId};
use stockroom_events::EventNotifier;
use stockroom_metadata::ProductStore;

use crate::builder::OrchestratorBuilder;
use crate::error::OrchestratorError;
use crate::metrics::OrchestratorMetrics;

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedProduct {
    pub product: Product,
    /// Object key the image was stored under.
    pub blob_key: String,
    /// Token that resolves the image through the cache until it expires.
    pub cache_token: String,
    /// Relative URL of the cached image, `/cache/{token}`.
    pub image_temp_url: String,
    /// Durable reference to the blob.
    pub image_real_url: String,
}

/// An image resolved through a cache token, ready to stream.
pub struct ProductImage {
    /// Object key, reported to clients as the download filename.
    pub key: String,
    pub content_type: String,
    pub content_length: u64,
    pub body: BlobBody,
}

impl std::fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductImage")
            .field("key", &self.key)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

impl ProductImage {
    /// `Content-Disposition` value naming the key as the download filename.
    pub fn content_disposition(&self) -> String {
        let escaped = self.key.replace('\\', "\\\\").replace('"', "\\\"");
        format!("attachment; filename=\"{escaped}\"")
    }
}

/// Coordinates the blob, metadata, cache, and event stores.
///
/// Holds no state of its own beyond counters. Every call runs its store
/// operations in order with no retries or timeouts of its own.
pub struct ProductOrchestrator {
    pub(crate) blob: Arc<dyn BlobStore>,
    pub(crate) metadata: Arc<dyn ProductStore>,
    pub(crate) cache: Arc<dyn CacheIndex>,
    pub(crate) notifier: Option<Arc<dyn EventNotifier>>,
    pub(crate) cache_ttl: Duration,
    pub(crate) event_topic: String,
    pub(crate) metrics: Arc<OrchestratorMetrics>,
}

impl std::fmt::Debug for ProductOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductOrchestrator")
            .field("blob_base_url", &self.blob.base_url())
            .field("cache_ttl", &self.cache_ttl)
            .field("event_topic", &self.event_topic)
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

impl ProductOrchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    pub fn metrics(&self) -> &OrchestratorMetrics {
        &self.metrics
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Validate and store a new product.
    ///
    /// Order: blob upload, metadata insert, cache entry, event. A failed
    /// upload leaves no metadata row. A failed insert leaves the uploaded
    /// blob in place. Cache and event failures are logged and do not fail
    /// the call.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<CreatedProduct, OrchestratorError> {
        let result = self.try_create(request).await;
        match &result {
            Ok(created) => {
                self.metrics.increment_created();
                info!(id = created.product.id, key = %created.blob_key, "product created");
            }
            Err(_) => self.metrics.increment_create_failed(),
        }
        result
    }

    async fn try_create(
        &self,
        request: CreateProductRequest,
    ) -> Result<CreatedProduct, OrchestratorError> {
        let upload = request.validate()?;
        debug!(
            key = %upload.blob_key,
            content_type = %upload.content_type,
            size = upload.size(),
            "upload validated"
        );

        self.blob
            .put(&upload.blob_key, &upload.content_type, upload.data)
            .await
            .map_err(OrchestratorError::BlobWrite)?;

        let image_real_url = self.blob.durable_url(&upload.blob_key);
        let product = self
            .metadata
            .insert(NewProduct::new(upload.name, image_real_url.clone()))
            .await
            .map_err(|e| {
                warn!(key = %upload.blob_key, error = %e, "metadata insert failed, blob left in place");
                OrchestratorError::MetadataWrite(e)
            })?;

        let cache_token = product.cache_token();
        if let Err(e) = self
            .cache
            .set(&cache_token, &upload.blob_key, self.cache_ttl)
            .await
        {
            self.metrics.increment_cache_write_failures();
            warn!(id = product.id, error = %e, "cache write failed");
        }

        self.publish_created(&product).await;

        Ok(CreatedProduct {
            image_temp_url: format!("/cache/{cache_token}"),
            product,
            blob_key: upload.blob_key,
            cache_token,
            image_real_url,
        })
    }

    async fn publish_created(&self, product: &Product) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let payload = Bytes::from(product.name.clone());
        if let Err(e) = notifier.publish(&self.event_topic, payload).await {
            self.metrics.increment_publish_failures();
            debug!(topic = %self.event_topic, error = %e, "event publish failed");
        }
    }

    /// Return one page of products in insertion order.
    ///
    /// Listing never fails: a metadata error is logged and yields an empty
    /// page.
    #[instrument(skip(self), fields(page = pagination.page, limit = pagination.limit))]
    pub async fn list_products(&self, pagination: Pagination) -> Vec<Product> {
        self.metrics.increment_listed();
        match self
            .metadata
            .scan(pagination.offset(), pagination.limit)
            .await
        {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "product scan failed");
                Vec::new()
            }
        }
    }

    /// Resolve a cache token to its image.
    ///
    /// The cache is the only lookup path. An expired or unknown token is a
    /// [`OrchestratorError::CacheMiss`] even if the product still exists.
    #[instrument(skip(self))]
    pub async fn read_product_image(
        &self,
        cache_token: &str,
    ) -> Result<ProductImage, OrchestratorError> {
        let key = match self.cache.get(cache_token).await {
            Ok(Some(key)) => key,
            Ok(None) => {
                self.metrics.increment_cache_misses();
                debug!("cache miss");
                return Err(OrchestratorError::CacheMiss(cache_token.to_owned()));
            }
            Err(e) => {
                self.metrics.increment_cache_misses();
                warn!(error = %e, "cache read failed");
                return Err(OrchestratorError::CacheRead(e));
            }
        };

        let object = self.blob.get(&key).await.map_err(|e| {
            debug!(key = %key, error = %e, "cached key did not resolve to a blob");
            OrchestratorError::BlobRead(e)
        })?;

        self.metrics.increment_images_served();
        Ok(ProductImage {
            key,
            content_type: object.content_type,
            content_length: object.content_length,
            body: object.body,
        })
    }

    /// Delete a product and its blob.
    ///
    /// The blob at the stored image reference goes first. If that fails the
    /// row is kept so the delete can be retried. Cache entries are left to
    /// expire and keep resolving until then.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), OrchestratorError> {
        let result = self.try_delete(id).await;
        match &result {
            Ok(()) => {
                self.metrics.increment_deleted();
                info!("product deleted");
            }
            Err(_) => self.metrics.increment_delete_failed(),
        }
        result
    }

    async fn try_delete(&self, id: ProductId) -> Result<(), OrchestratorError> {
        if id <= 0 {
            return Err(OrchestratorError::NotFound(id));
        }

        let product = self
            .metadata
            .get(id)
            .await
            .map_err(OrchestratorError::MetadataDelete)?
            .ok_or(OrchestratorError::NotFound(id))?;

        // The stored reference is handed to the store as-is.
        self.blob
            .delete(&product.photo_key)
            .await
            .map_err(OrchestratorError::BlobDelete)?;

        let existed = self
            .metadata
            .delete(id)
            .await
            .map_err(OrchestratorError::MetadataDelete)?;
        if !existed {
            return Err(OrchestratorError::NotFound(id));
        }
        Ok(())
    }

    /// Release store resources. Call once, after request handling stops.
    pub async fn shutdown(&self) {
        self.metadata.close().await;
        info!("orchestrator shutdown complete");
    }
}
