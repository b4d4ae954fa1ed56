pub mod error;
pub mod index;
pub mod testing;

pub use error::CacheError;
pub use index::CacheIndex;
