//! Lease manager that dispatches to the configured store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use enroll_core::config::cache::CacheConfig;
use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::traits::lease_store::LeaseStore;

/// Wraps the configured lease store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Clone)]
pub struct LeaseManager {
    inner: Arc<dyn LeaseStore>,
}

impl LeaseManager {
    /// Create a new lease manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn LeaseStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis lease store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisLeaseStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory lease store");
                Arc::new(crate::memory::MemoryLeaseStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a lease manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn LeaseStore>) -> Self {
        Self { inner: store }
    }
}

#[async_trait]
impl LeaseStore for LeaseManager {
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.set_nx(key, value, ttl).await
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.inner.compare_and_delete(key, expected).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
