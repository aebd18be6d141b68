//! In-memory lease store.

pub mod store;

pub use store::MemoryLeaseStore;
