use async_trait::async_trait;
use bytes::Bytes;
use deadpool_redis::{Config, Pool, Runtime};
use futures::StreamExt;
use redis::AsyncCommands;
use tracing::{debug, instrument};

use stockroom_core::Event;
use stockroom_events::{EventError, EventNotifier, EventSource, EventStream};

use crate::config::RedisEventConfig;

/// Redis pub/sub implementation of [`EventNotifier`] and [`EventSource`].
///
/// Publishing borrows a pooled connection. Each subscription opens its own
/// dedicated pub/sub connection, which closes when the stream is dropped.
pub struct RedisEventBus {
    pool: Pool,
    client: redis::Client,
}

impl std::fmt::Debug for RedisEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisEventBus").finish_non_exhaustive()
    }
}

impl RedisEventBus {
    /// Create a new `RedisEventBus`. Connections are opened lazily.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Connection`] if the URL is invalid or the pool
    /// cannot be created.
    pub fn new(config: &RedisEventConfig) -> Result<Self, EventError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| EventError::Connection(e.to_string()))?;

        let pool = Config::from_url(&config.url)
            .builder()
            .map(|b| {
                b.max_size(config.pool_size)
                    .wait_timeout(Some(config.connection_timeout))
                    .runtime(Runtime::Tokio1)
                    .build()
            })
            .map_err(|e| EventError::Connection(e.to_string()))?
            .map_err(|e| EventError::Connection(e.to_string()))?;

        Ok(Self { pool, client })
    }
}

#[async_trait]
impl EventNotifier for RedisEventBus {
    #[instrument(skip(self, payload), fields(size = payload.len()))]
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), EventError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| EventError::Connection(e.to_string()))?;

        let receivers: i64 = conn
            .publish(topic, payload.as_ref())
            .await
            .map_err(|e| EventError::Publish(e.to_string()))?;

        debug!(receivers, "event published");
        Ok(())
    }
}

#[async_trait]
impl EventSource for RedisEventBus {
    #[instrument(skip(self))]
    async fn subscribe(&self, topic: &str) -> Result<EventStream, EventError> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| EventError::Connection(e.to_string()))?;

        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| EventError::Subscribe(e.to_string()))?;

        let stream = pubsub.into_on_message().map(|msg| {
            Event::new(
                msg.get_channel_name().to_owned(),
                Bytes::copy_from_slice(msg.get_payload_bytes()),
            )
        });
        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_url() {
        let config = RedisEventConfig {
            url: "nats://localhost:4222".into(),
            ..RedisEventConfig::default()
        };
        assert!(matches!(
            RedisEventBus::new(&config),
            Err(EventError::Connection(_))
        ));
    }

    #[test]
    fn construction_does_not_connect() {
        let config = RedisEventConfig {
            url: "redis://127.0.0.1:1".into(),
            ..RedisEventConfig::default()
        };
        assert!(RedisEventBus::new(&config).is_ok());
    }
}
