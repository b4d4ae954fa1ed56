//! Fire-and-forget event notification.
//!
//! [`EventNotifier`] is the publishing half used by request handling.
//! [`EventSource`] is the subscribing half, consumed only by the background
//! task started with [`spawn_logging_subscriber`].

pub mod error;
pub mod notifier;
pub mod subscriber;
pub mod testing;

pub use error::EventError;
pub use notifier::{EventNotifier, EventSource, EventStream};
pub use subscriber::spawn_logging_subscriber;
