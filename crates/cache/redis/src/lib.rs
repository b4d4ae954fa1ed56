mod config;
mod index;

pub use config::RedisCacheConfig;
pub use index::RedisCacheIndex;
