// Adapters layer: concrete implementations of the domain ports (filesystem
// storage, JSON roster persistence).

pub mod storage;
pub mod store;
