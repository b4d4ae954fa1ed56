mod bus;

pub use bus::MemoryEventBus;
