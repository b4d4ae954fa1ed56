use serde::Deserialize;

use stockroom_core::PRODUCT_CREATED_TOPIC;

/// Configuration for product lifecycle events.
#[derive(Debug, Deserialize)]
pub struct EventsConfig {
    /// Which backend to use: `"memory"`, `"redis"`, or `"none"` to disable
    /// publishing.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Connection URL for the Redis backend.
    pub url: Option<String>,
    /// Topic creation events are published on.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Whether to run the background subscriber that logs received events.
    #[serde(default = "default_subscriber")]
    pub subscriber: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            topic: default_topic(),
            subscriber: default_subscriber(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

fn default_topic() -> String {
    PRODUCT_CREATED_TOPIC.to_owned()
}

fn default_subscriber() -> bool {
    true
}
