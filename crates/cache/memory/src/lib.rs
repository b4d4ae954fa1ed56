mod index;

pub use index::MemoryCacheIndex;
