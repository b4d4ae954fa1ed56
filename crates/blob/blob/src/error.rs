use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No object exists under the requested key.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The backend rejected the request because of rate limiting.
    #[error("blob storage throttled")]
    Throttled,

    /// The request did not complete in time.
    #[error("blob storage timed out")]
    Timeout,

    /// The backend could not be reached.
    #[error("blob storage connection error: {0}")]
    Connection(String),

    /// The backend returned an error for the request.
    #[error("blob storage error: {0}")]
    Storage(String),

    /// The store is misconfigured (missing bucket, bad credentials).
    #[error("invalid blob storage configuration: {0}")]
    Configuration(String),
}

impl BlobError {
    /// Whether this error means the object is absent rather than unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Classify a backend error message into the appropriate [`BlobError`].
///
/// Inspects the message for common throttling, timeout, and connection
/// patterns.
pub fn classify_backend_error(message: &str) -> BlobError {
    let lower = message.to_lowercase();
    if lower.contains("throttl") || lower.contains("slow down") || lower.contains("too many") {
        BlobError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        BlobError::Timeout
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("dispatch failure")
    {
        BlobError::Connection(message.to_owned())
    } else {
        BlobError::Storage(message.to_owned())
    }
}
