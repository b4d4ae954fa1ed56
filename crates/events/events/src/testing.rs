use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;

use crate::error::EventError;
use crate::notifier::{EventNotifier, EventSource};

/// How long to wait for a published event to arrive.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Run the event conformance test suite against a backend that implements
/// both halves.
///
/// # Errors
///
/// Returns an error if publishing or subscribing fails unexpectedly.
pub async fn run_event_conformance_tests<B>(bus: &B) -> Result<(), EventError>
where
    B: EventNotifier + EventSource,
{
    test_publish_without_subscribers(bus).await?;
    test_delivery_on_topic(bus).await?;
    Ok(())
}

async fn test_publish_without_subscribers(bus: &dyn EventNotifier) -> Result<(), EventError> {
    bus.publish("conformance.nobody", Bytes::from_static(b"ignored"))
        .await
}

async fn test_delivery_on_topic<B>(bus: &B) -> Result<(), EventError>
where
    B: EventNotifier + EventSource,
{
    let mut events = bus.subscribe("conformance.wanted").await?;

    bus.publish("conformance.other", Bytes::from_static(b"skip"))
        .await?;
    bus.publish("conformance.wanted", Bytes::from_static(b"Chair"))
        .await?;

    let event = tokio::time::timeout(DELIVERY_TIMEOUT, events.next())
        .await
        .map_err(|_| EventError::Subscribe("timed out waiting for event".into()))?
        .ok_or_else(|| EventError::Subscribe("stream ended".into()))?;

    assert_eq!(event.topic, "conformance.wanted", "only subscribed topic");
    assert_eq!(&event.payload[..], b"Chair");
    Ok(())
}
