use thiserror::Error;

/// Reasons a create request is rejected before any store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,

    #[error("name is {len} characters long, maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("product_photo file is required")]
    MissingFile,

    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),
}
