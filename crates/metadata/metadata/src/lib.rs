pub mod error;
pub mod store;
pub mod testing;

pub use error::MetadataError;
pub use store::ProductStore;
