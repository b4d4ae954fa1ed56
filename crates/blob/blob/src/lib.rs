pub mod error;
pub mod object;
pub mod store;
pub mod testing;

pub use error::{BlobError, classify_backend_error};
pub use object::{BlobBody, BlobObject};
pub use store::BlobStore;
