//! Token-guarded admission leases.

pub mod manager;

pub use manager::{LeaseGuard, LockManager};
