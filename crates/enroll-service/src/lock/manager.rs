//! Non-blocking lock manager over a shared keyed store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use enroll_core::result::AppResult;
use enroll_core::traits::lease_store::LeaseStore;

/// Acquires and releases short-lived leases.
///
/// Acquisition never blocks, retries or queues: a held key is reported
/// back immediately. Release deletes the key only while it still holds
/// the caller's token, so a late release can never remove a lease that
/// expired and was taken by someone else.
#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn LeaseStore>,
    default_ttl: Duration,
}

impl LockManager {
    /// Create a lock manager with the given lease TTL.
    pub fn new(store: Arc<dyn LeaseStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    /// Generate a fresh random lease token.
    pub fn new_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Store `token` at `key` for `ttl` if the key is free.
    pub async fn acquire(&self, key: &str, token: &str, ttl: Duration) -> AppResult<bool> {
        self.store.set_nx(key, token, ttl).await
    }

    /// Delete `key` if it still holds `token`.
    pub async fn release(&self, key: &str, token: &str) -> AppResult<bool> {
        self.store.compare_and_delete(key, token).await
    }

    /// Try to take `key` with a fresh token and the default TTL.
    ///
    /// Returns `None` when the key is already held.
    pub async fn try_lock(&self, key: impl Into<String>) -> AppResult<Option<LeaseGuard>> {
        let key = key.into();
        let token = Self::new_token();
        if !self.acquire(&key, &token, self.default_ttl).await? {
            debug!(key = %key, "Lease is held elsewhere");
            return Ok(None);
        }
        Ok(Some(LeaseGuard {
            manager: self.clone(),
            key,
            token,
            released: false,
        }))
    }
}

/// A held lease.
///
/// Call [`LeaseGuard::release`] when the protected section ends. If the
/// guard is dropped without it (a cancelled request task), release is
/// spawned onto the runtime; the TTL covers the case where no runtime is
/// left to run it.
pub struct LeaseGuard {
    manager: LockManager,
    key: String,
    token: String,
    released: bool,
}

impl LeaseGuard {
    /// The leased key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the lease. Failures are logged, never returned.
    pub async fn release(mut self) -> bool {
        self.released = true;
        match self.manager.release(&self.key, &self.token).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(key = %self.key, "Lease expired before release");
                false
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to release lease");
                false
            }
        }
    }
}

impl Drop for LeaseGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let manager = self.manager.clone();
        let key = std::mem::take(&mut self.key);
        let token = std::mem::take(&mut self.token);
        handle.spawn(async move {
            if let Err(e) = manager.release(&key, &token).await {
                warn!(key = %key, error = %e, "Failed to release dropped lease");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use enroll_cache::memory::MemoryLeaseStore;
    use enroll_core::config::cache::MemoryCacheConfig;

    use super::*;

    fn manager() -> (LockManager, Arc<MemoryLeaseStore>) {
        let store = Arc::new(MemoryLeaseStore::new(&MemoryCacheConfig::default()));
        (
            LockManager::new(store.clone(), Duration::from_secs(10)),
            store,
        )
    }

    #[tokio::test]
    async fn test_second_acquire_fails_fast() {
        let (locks, _) = manager();
        let guard = locks.try_lock("k").await.expect("lock").expect("held");
        assert!(locks.try_lock("k").await.expect("lock").is_none());
        assert!(guard.release().await);
        assert!(locks.try_lock("k").await.expect("lock").is_some());
    }

    #[tokio::test]
    async fn test_release_with_foreign_token_is_refused() {
        let (locks, store) = manager();
        assert!(
            locks
                .acquire("k", "mine", Duration::from_secs(10))
                .await
                .expect("acquire")
        );
        assert!(!locks.release("k", "theirs").await.expect("release"));
        assert!(store.exists("k").await.expect("exists"));
        assert!(locks.release("k", "mine").await.expect("release"));
    }

    #[tokio::test]
    async fn test_dropped_guard_releases_in_background() {
        let (locks, store) = manager();
        let guard = locks.try_lock("k").await.expect("lock").expect("held");
        drop(guard);
        for _ in 0..10 {
            if !store.exists("k").await.expect("exists") {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("dropped lease was not released");
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(LockManager::new_token(), LockManager::new_token());
    }
}
