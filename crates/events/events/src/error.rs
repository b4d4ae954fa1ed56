use thiserror::Error;

/// Errors from publishing or subscribing to events.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("subscribe failed: {0}")]
    Subscribe(String),
}
