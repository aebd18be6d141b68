//! Shared keyed store used to hold admission leases.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A keyed store offering atomic set-if-absent and compare-and-delete.
///
/// Any conforming backend satisfies the lock contract: an in-process map
/// for tests and single-node runs, or Redis for a multi-node deployment.
/// Neither operation may be emulated with a separate read followed by a
/// write.
#[async_trait]
pub trait LeaseStore: Send + Sync + 'static {
    /// Store `value` at `key` with the given expiry, only if `key` is absent.
    ///
    /// Returns `true` if the value was stored.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete `key` only if it currently holds `expected`.
    ///
    /// Returns `true` if the key was deleted.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool>;

    /// Read the current value at `key`, ignoring expired entries.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Whether `key` currently holds a live value.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
