//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod admission;
pub mod cache;
pub mod database;
pub mod directory;
pub mod logging;
pub mod notification;

use serde::{Deserialize, Serialize};

pub use self::admission::{AdmissionConfig, LockScope};
pub use self::cache::{CacheConfig, MemoryCacheConfig, RedisCacheConfig};
pub use self::database::DatabaseConfig;
pub use self::directory::DirectoryConfig;
pub use self::logging::LoggingConfig;
pub use self::notification::NotificationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the configuration file merged
/// with `ENROLLHUB__SECTION__KEY` environment overrides. Every section
/// has defaults, so an empty file yields a fully in-memory deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Enrollment store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Shared keyed store (lock leases) settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Remote course/student directory settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Admission engine tuning.
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Notification emitter settings.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; environment variables prefixed with
    /// `ENROLLHUB` and separated by `__` override individual keys.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ENROLLHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("config/does-not-exist").expect("defaults");
        assert_eq!(config.cache.provider, "memory");
        assert_eq!(config.database.provider, "memory");
        assert_eq!(config.admission.lock_ttl_seconds, 10);
        assert_eq!(config.admission.lock_scope, LockScope::Pair);
        assert!((config.admission.max_credits - 30.0).abs() < f64::EPSILON);
    }
}
