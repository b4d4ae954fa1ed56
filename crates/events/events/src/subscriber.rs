use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::notifier::EventSource;

/// Spawn a task that logs every event received on `topic`.
///
/// The task owns nothing the request path depends on. It ends when the
/// stream closes or the returned handle is aborted. A failed subscription is
/// logged and ends the task.
pub fn spawn_logging_subscriber(source: Arc<dyn EventSource>, topic: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = match source.subscribe(&topic).await {
            Ok(events) => events,
            Err(e) => {
                warn!(topic = %topic, error = %e, "event subscription failed");
                return;
            }
        };
        info!(topic = %topic, "event subscriber started");

        while let Some(event) = events.next().await {
            info!(topic = %event.topic, payload = %event.payload_lossy(), "received event");
        }

        info!(topic = %topic, "event subscriber stopped");
    })
}
