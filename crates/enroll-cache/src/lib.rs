//! # enroll-cache
//!
//! Shared keyed stores holding admission lock leases. Two backends:
//!
//! - **memory**: an in-process concurrent map with per-entry expiry
//! - **redis**: Redis via the [redis](https://crates.io/crates/redis) crate,
//!   with a Lua script for compare-and-delete
//!
//! The backend is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::LeaseManager;
