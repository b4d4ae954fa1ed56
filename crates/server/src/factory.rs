use std::sync::Arc;
#[cfg(feature = "redis")]
use std::time::Duration;

use tracing::info;

use stockroom_blob::BlobStore;
use stockroom_blob_memory::MemoryBlobStore;
#[cfg(feature = "s3")]
use stockroom_blob_s3::{S3BlobStore, S3Config};
use stockroom_cache::CacheIndex;
use stockroom_cache_memory::MemoryCacheIndex;
#[cfg(feature = "redis")]
use stockroom_cache_redis::{RedisCacheConfig, RedisCacheIndex};
use stockroom_events::{EventNotifier, EventSource};
use stockroom_events_memory::MemoryEventBus;
#[cfg(feature = "redis")]
use stockroom_events_redis::{RedisEventBus, RedisEventConfig};
use stockroom_metadata::ProductStore;
use stockroom_metadata_memory::MemoryProductStore;
#[cfg(feature = "postgres")]
use stockroom_metadata_postgres::{PostgresConfig, PostgresProductStore};
use stockroom_orchestrator::ProductOrchestrator;

use crate::config::{BlobConfig, CacheConfig, EventsConfig, MetadataConfig, StockroomConfig};
use crate::error::ServerError;

/// Both halves of the configured event backend. `none` leaves both empty.
#[derive(Default)]
pub struct EventBackend {
    pub notifier: Option<Arc<dyn EventNotifier>>,
    pub source: Option<Arc<dyn EventSource>>,
}

/// Create the blob store from the given configuration.
#[allow(clippy::unused_async)]
pub async fn create_blob(config: &BlobConfig) -> Result<Arc<dyn BlobStore>, ServerError> {
    let store: Arc<dyn BlobStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryBlobStore::new()),
        #[cfg(feature = "s3")]
        "s3" => {
            let mut s3_config = S3Config::new(&config.region, &config.bucket);
            s3_config.endpoint_url.clone_from(&config.endpoint_url);
            s3_config.access_key.clone_from(&config.access_key);
            s3_config.secret_key.clone_from(&config.secret_key);
            s3_config.public_url.clone_from(&config.public_url);
            s3_config.force_path_style = config.force_path_style;
            Arc::new(S3BlobStore::new(s3_config).await)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported blob backend: {other} (is the matching feature enabled?)"
            )));
        }
    };

    info!(backend = %config.backend, base_url = %store.base_url(), "blob store initialized");
    Ok(store)
}

/// Create the metadata store. The `postgres` backend creates its table if
/// missing.
#[allow(clippy::unused_async)]
pub async fn create_metadata(
    config: &MetadataConfig,
) -> Result<Arc<dyn ProductStore>, ServerError> {
    let store: Arc<dyn ProductStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryProductStore::new()),
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.url.clone().ok_or_else(|| {
                ServerError::Config("postgres metadata backend requires [metadata] url".into())
            })?;
            let pg_config = PostgresConfig {
                url,
                pool_size: config.pool_size,
                schema: config.schema.clone(),
                table: config.table.clone(),
                ssl_mode: config.ssl_mode.clone(),
            };
            let store = PostgresProductStore::new(pg_config)
                .await
                .map_err(|e| ServerError::Config(format!("metadata postgres: {e}")))?;
            Arc::new(store)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported metadata backend: {other} (is the matching feature enabled?)"
            )));
        }
    };

    info!(backend = %config.backend, "metadata store initialized");
    Ok(store)
}

/// Create the cache index.
pub fn create_cache(config: &CacheConfig) -> Result<Arc<dyn CacheIndex>, ServerError> {
    let index: Arc<dyn CacheIndex> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryCacheIndex::new()),
        #[cfg(feature = "redis")]
        "redis" => {
            let url = config.url.clone().ok_or_else(|| {
                ServerError::Config("redis cache backend requires [cache] url".into())
            })?;
            let redis_config = RedisCacheConfig {
                url,
                prefix: config.prefix.clone(),
                pool_size: config.pool_size,
                connection_timeout: Duration::from_secs(5),
            };
            let index = RedisCacheIndex::new(redis_config)
                .map_err(|e| ServerError::Config(format!("cache redis: {e}")))?;
            Arc::new(index)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported cache backend: {other} (is the matching feature enabled?)"
            )));
        }
    };

    info!(backend = %config.backend, "cache index initialized");
    Ok(index)
}

/// Create the event notifier and, when the backend can deliver events back,
/// the matching source.
pub fn create_events(config: &EventsConfig) -> Result<EventBackend, ServerError> {
    let backend = match config.backend.as_str() {
        "none" => EventBackend::default(),
        "memory" => {
            let bus = Arc::new(MemoryEventBus::new());
            EventBackend {
                notifier: Some(Arc::clone(&bus) as Arc<dyn EventNotifier>),
                source: Some(bus as Arc<dyn EventSource>),
            }
        }
        #[cfg(feature = "redis")]
        "redis" => {
            let url = config.url.clone().ok_or_else(|| {
                ServerError::Config("redis events backend requires [events] url".into())
            })?;
            let bus = RedisEventBus::new(&RedisEventConfig {
                url,
                ..RedisEventConfig::default()
            })
            .map_err(|e| ServerError::Config(format!("events redis: {e}")))?;
            let bus = Arc::new(bus);
            EventBackend {
                notifier: Some(Arc::clone(&bus) as Arc<dyn EventNotifier>),
                source: Some(bus as Arc<dyn EventSource>),
            }
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported events backend: {other} (is the matching feature enabled?)"
            )));
        }
    };

    info!(backend = %config.backend, topic = %config.topic, "event backend initialized");
    Ok(backend)
}

/// Build every configured backend and wire them into an orchestrator.
///
/// Returns the event source alongside so the caller can run the background
/// subscriber.
pub async fn build_orchestrator(
    config: &StockroomConfig,
) -> Result<(ProductOrchestrator, Option<Arc<dyn EventSource>>), ServerError> {
    let blob = create_blob(&config.blob).await?;
    let metadata = create_metadata(&config.metadata).await?;
    let cache = create_cache(&config.cache)?;
    let events = create_events(&config.events)?;

    let mut builder = ProductOrchestrator::builder()
        .blob(blob)
        .metadata(metadata)
        .cache(cache)
        .cache_ttl(std::time::Duration::from_secs(config.cache.ttl_seconds))
        .event_topic(config.events.topic.clone());
    if let Some(notifier) = events.notifier {
        builder = builder.notifier(notifier);
    }

    Ok((builder.build()?, events.source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_builds_memory_backends() {
        let config = StockroomConfig::default();
        let (orchestrator, source) = build_orchestrator(&config).await.unwrap();
        assert!(source.is_some());
        assert_eq!(orchestrator.cache_ttl(), std::time::Duration::from_secs(60));
    }

    #[tokio::test]
    async fn unknown_blob_backend_is_rejected() {
        let config = BlobConfig {
            backend: "gcs".into(),
            ..BlobConfig::default()
        };
        let err = create_blob(&config).await.err().unwrap();
        assert!(err.to_string().contains("unsupported blob backend: gcs"));
    }

    #[tokio::test]
    async fn unknown_metadata_backend_is_rejected() {
        let config = MetadataConfig {
            backend: "sqlite".into(),
            ..MetadataConfig::default()
        };
        assert!(matches!(
            create_metadata(&config).await,
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn events_none_has_no_notifier() {
        let config = EventsConfig {
            backend: "none".into(),
            ..EventsConfig::default()
        };
        let backend = create_events(&config).unwrap();
        assert!(backend.notifier.is_none());
        assert!(backend.source.is_none());
    }

    #[test]
    fn unknown_cache_backend_is_rejected() {
        let config = CacheConfig {
            backend: "memcached".into(),
            ..CacheConfig::default()
        };
        assert!(create_cache(&config).is_err());
    }

    #[cfg(feature = "redis")]
    #[test]
    fn redis_cache_requires_url() {
        let config = CacheConfig {
            backend: "redis".into(),
            ..CacheConfig::default()
        };
        let err = create_cache(&config).err().unwrap();
        assert!(err.to_string().contains("[cache] url"));
    }

    #[cfg(feature = "postgres")]
    #[tokio::test]
    async fn postgres_metadata_requires_url() {
        let config = MetadataConfig {
            backend: "postgres".into(),
            ..MetadataConfig::default()
        };
        let err = create_metadata(&config).await.err().unwrap();
        assert!(err.to_string().contains("[metadata] url"));
    }
}
