use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use stockroom_core::Event;

use crate::error::EventError;

/// Stream of events delivered to a subscriber. Ends when the source closes.
pub type EventStream = BoxStream<'static, Event>;

/// Publishes events to a topic.
///
/// Delivery is at-most-once: subscribers that are not connected when an
/// event is published never see it.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), EventError>;
}

/// Delivers events published on a topic.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn subscribe(&self, topic: &str) -> Result<EventStream, EventError>;
}
