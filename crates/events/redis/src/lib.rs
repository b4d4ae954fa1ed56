mod bus;
mod config;

pub use bus::RedisEventBus;
pub use config::RedisEventConfig;
