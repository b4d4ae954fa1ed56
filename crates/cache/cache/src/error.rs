use thiserror::Error;

/// Errors from cache index operations.
///
/// A missing or expired key is not an error; `get` returns `None` for it.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend error: {0}")]
    Backend(String),
}
