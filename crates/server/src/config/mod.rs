mod blob;
mod cache;
mod events;
mod metadata;
mod server;
mod telemetry;


pub use blob::*;
pub use cache::*;
pub use events::*;
pub use metadata::*;
pub use server::*;
pub use telemetry::*;

use std::path::Path;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the Stockroom server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct StockroomConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object store holding product images.
    #[serde(default)]
    pub blob: BlobConfig,
    /// Relational store holding product rows.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// TTL cache mapping cache tokens to blob keys.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Event notifier for product lifecycle events.
    #[serde(default)]
    pub events: EventsConfig,
    /// `OpenTelemetry` tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl StockroomConfig {
    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Self::parse("");
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }
}
