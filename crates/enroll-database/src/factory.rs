//! Enrollment store selection from configuration.

use std::sync::Arc;

use tracing::info;

use enroll_core::config::DatabaseConfig;
use enroll_core::error::AppError;
use enroll_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryEnrollmentStore;
use crate::repositories::EnrollmentRepository;
use crate::store::EnrollmentStore;

/// Build the enrollment store named by `config.provider`.
pub async fn build_store(config: &DatabaseConfig) -> AppResult<Arc<dyn EnrollmentStore>> {
    match config.provider.as_str() {
        "memory" => {
            info!("Using in-memory enrollment store");
            Ok(Arc::new(MemoryEnrollmentStore::new()))
        }
        "postgres" => {
            let pool = DatabasePool::connect(config).await?;
            info!("Using PostgreSQL enrollment store");
            Ok(Arc::new(EnrollmentRepository::new(pool.into_pool())))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider: {other}"
        ))),
    }
}
