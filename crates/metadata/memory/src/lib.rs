mod store;

pub use store::MemoryProductStore;
