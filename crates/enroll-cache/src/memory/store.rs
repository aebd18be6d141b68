//! In-memory lease store using a concurrent map with expiry instants.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use enroll_core::config::cache::MemoryCacheConfig;
use enroll_core::result::AppResult;
use enroll_core::traits::lease_store::LeaseStore;

/// One stored value with its expiry.
#[derive(Debug, Clone)]
struct Lease {
    value: String,
    expires_at: Instant,
}

impl Lease {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-process lease store for tests and single-node deployments.
///
/// Every operation runs under the map's shard lock for its key, so
/// set-if-absent and compare-and-delete are atomic per key.
#[derive(Debug, Clone)]
pub struct MemoryLeaseStore {
    entries: Arc<DashMap<String, Lease>>,
    max_entries: usize,
}

impl MemoryLeaseStore {
    /// Create a new in-memory lease store from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_entries: config.max_entries,
        }
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries once the map grows past its bound.
    fn sweep_if_needed(&self, now: Instant) {
        if self.entries.len() < self.max_entries {
            return;
        }
        let before = self.entries.len();
        self.entries.retain(|_, lease| lease.is_live(now));
        debug!(
            removed = before.saturating_sub(self.entries.len()),
            "Swept expired leases"
        );
    }
}

#[async_trait]
impl LeaseStore for MemoryLeaseStore {
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        self.sweep_if_needed(now);

        let lease = Lease {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        let stored = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    false
                } else {
                    occupied.insert(lease);
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(lease);
                true
            }
        };
        Ok(stored)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let now = Instant::now();
        let removed = self
            .entries
            .remove_if(key, |_, lease| lease.is_live(now) && lease.value == expected);
        Ok(removed.is_some())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .filter(|lease| lease.is_live(now))
            .map(|lease| lease.value.clone()))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
