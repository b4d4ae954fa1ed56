use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use stockroom_blob::BlobStore;
use stockroom_cache::CacheIndex;
use stockroom_core::{CACHE_TTL, PRODUCT_CREATED_TOPIC};
use stockroom_events::EventNotifier;
use stockroom_metadata::ProductStore;

use crate::metrics::OrchestratorMetrics;
use crate::orchestrator::ProductOrchestrator;

/// A required store was not supplied to [`OrchestratorBuilder`].
#[derive(Debug, Error)]
#[error("{0} is required")]
pub struct BuildError(pub &'static str);

/// Fluent builder for constructing a [`ProductOrchestrator`].
///
/// The blob, metadata, and cache stores are required. Without a notifier,
/// product-created events are not published.
pub struct OrchestratorBuilder {
    blob: Option<Arc<dyn BlobStore>>,
    metadata: Option<Arc<dyn ProductStore>>,
    cache: Option<Arc<dyn CacheIndex>>,
    notifier: Option<Arc<dyn EventNotifier>>,
    cache_ttl: Duration,
    event_topic: String,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            blob: None,
            metadata: None,
            cache: None,
            notifier: None,
            cache_ttl: CACHE_TTL,
            event_topic: PRODUCT_CREATED_TOPIC.to_owned(),
        }
    }

    #[must_use]
    pub fn blob(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob = Some(store);
        self
    }

    #[must_use]
    pub fn metadata(mut self, store: Arc<dyn ProductStore>) -> Self {
        self.metadata = Some(store);
        self
    }

    #[must_use]
    pub fn cache(mut self, index: Arc<dyn CacheIndex>) -> Self {
        self.cache = Some(index);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn EventNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Lifetime of cache tokens. Defaults to [`CACHE_TTL`].
    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Topic product-created events are published on. Defaults to
    /// [`PRODUCT_CREATED_TOPIC`].
    #[must_use]
    pub fn event_topic(mut self, topic: impl Into<String>) -> Self {
        self.event_topic = topic.into();
        self
    }

    /// Consume the builder and produce a [`ProductOrchestrator`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] naming the first missing store.
    pub fn build(self) -> Result<ProductOrchestrator, BuildError> {
        let blob = self.blob.ok_or(BuildError("blob store"))?;
        let metadata = self.metadata.ok_or(BuildError("metadata store"))?;
        let cache = self.cache.ok_or(BuildError("cache index"))?;

        Ok(ProductOrchestrator {
            blob,
            metadata,
            cache,
            notifier: self.notifier,
            cache_ttl: self.cache_ttl,
            event_topic: self.event_topic,
            metrics: Arc::new(OrchestratorMetrics::default()),
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
