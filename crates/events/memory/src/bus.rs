use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::debug;

use stockroom_core::Event;
use stockroom_events::{EventError, EventNotifier, EventSource, EventStream};

const DEFAULT_CAPACITY: usize = 256;

/// In-process event bus built on a tokio broadcast channel.
///
/// Every subscriber sees every event and filters by topic. A subscriber that
/// falls more than the channel capacity behind skips the events it missed.
#[derive(Debug, Clone)]
pub struct MemoryEventBus {
    sender: broadcast::Sender<Event>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventNotifier for MemoryEventBus {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), EventError> {
        // No receivers is not an error: nobody was listening.
        let delivered = self.sender.send(Event::new(topic, payload)).unwrap_or(0);
        debug!(topic, delivered, "event published");
        Ok(())
    }
}

#[async_trait]
impl EventSource for MemoryEventBus {
    async fn subscribe(&self, topic: &str) -> Result<EventStream, EventError> {
        let topic = topic.to_owned();
        let stream = BroadcastStream::new(self.sender.subscribe()).filter_map(move |result| {
            match result {
                Ok(event) if event.topic == topic => Some(event),
                Ok(_) => None,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    debug!(skipped, "event subscriber lagged");
                    None
                }
            }
        });
        Ok(Box::pin(stream))
    }
}
