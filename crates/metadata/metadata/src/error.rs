use thiserror::Error;

/// Errors from product metadata operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("migration error: {0}")]
    Migration(String),
}
