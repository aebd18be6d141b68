//! Redis lease store.

pub mod client;
pub mod operations;

pub use client::RedisClient;
pub use operations::RedisLeaseStore;
