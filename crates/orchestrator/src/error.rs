use thiserror::Error;

use stockroom_blob::BlobError;
use stockroom_cache::CacheError;
use stockroom_core::{ProductId, ValidationError};
use stockroom_metadata::MetadataError;

/// Errors returned by [`ProductOrchestrator`](crate::ProductOrchestrator)
/// operations.
///
/// Cache writes and event publishing never produce one of these; their
/// failures are logged and counted instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The request was rejected before any store was touched.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// No product exists with this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("blob upload failed: {0}")]
    BlobWrite(#[source] BlobError),

    /// The cache resolved a key but the blob could not be read.
    #[error("blob read failed: {0}")]
    BlobRead(#[source] BlobError),

    #[error("blob delete failed: {0}")]
    BlobDelete(#[source] BlobError),

    #[error("metadata write failed: {0}")]
    MetadataWrite(#[source] MetadataError),

    #[error("metadata delete failed: {0}")]
    MetadataDelete(#[source] MetadataError),

    /// No live cache entry for this token. An expected outcome once the TTL
    /// has elapsed.
    #[error("cache token not found: {0}")]
    CacheMiss(String),

    /// The cache backend failed while resolving a token.
    #[error("cache read failed: {0}")]
    CacheRead(#[source] CacheError),
}

impl OrchestratorError {
    /// Stable discriminator reported to clients as the error `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "request-validation",
            Self::NotFound(_) => "product-not-found",
            Self::BlobWrite(_) => "file-upload-cdn",
            Self::BlobRead(_) => "file-not-exist",
            Self::BlobDelete(_) => "file-delete-cdn",
            Self::MetadataWrite(_) | Self::MetadataDelete(_) => "database-error",
            Self::CacheMiss(_) | Self::CacheRead(_) => "file-cache",
        }
    }

    /// Human-readable summary reported alongside [`kind`](Self::kind).
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid request body",
            Self::NotFound(_) => "Product not found in database",
            Self::BlobWrite(_) => "Error uploading file to CDN",
            Self::BlobRead(_) => "Error getting file! Is the file exist, or is the key correct?",
            Self::BlobDelete(_) => "Error deleting file from CDN",
            Self::MetadataWrite(_) => "Error creating product on database",
            Self::MetadataDelete(_) => "Error deleting product",
            Self::CacheMiss(_) | Self::CacheRead(_) => "File not found in cache",
        }
    }

    /// Whether the error means something the caller asked for is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::BlobRead(_) | Self::CacheMiss(_) | Self::CacheRead(_)
        )
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
