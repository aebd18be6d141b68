//! Wiring of backends and services from configuration.

use std::sync::Arc;

use enroll_cache::LeaseManager;
use enroll_core::config::{AdmissionConfig, AppConfig};
use enroll_core::result::AppResult;
use enroll_core::traits::lease_store::LeaseStore;
use enroll_core::traits::notification::NotificationEmitter;
use enroll_database::build_store;
use enroll_database::store::EnrollmentStore;
use enroll_directory::Directories;

use crate::admission::AdmissionService;
use crate::catalog::CatalogService;
use crate::enrollment::EnrollmentService;
use crate::grading::GradingService;
use crate::lock::LockManager;
use crate::notification::{NotificationService, build_emitter};

/// The collaborators every service is built from.
#[derive(Clone)]
pub struct Backends {
    /// Enrollment store.
    pub store: Arc<dyn EnrollmentStore>,
    /// Shared keyed store for leases.
    pub leases: Arc<dyn LeaseStore>,
    /// Remote directories.
    pub directories: Directories,
    /// Event emitter.
    pub emitter: Arc<dyn NotificationEmitter>,
}

/// Reachability of one backend.
#[derive(Debug, Clone)]
pub struct ComponentHealth {
    /// Backend name.
    pub name: &'static str,
    /// Whether the backend answered.
    pub healthy: bool,
    /// Error detail when it did not.
    pub detail: Option<String>,
}

impl Backends {
    /// Build every backend named in `config`.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = build_store(&config.database).await?;
        let leases: Arc<dyn LeaseStore> = Arc::new(LeaseManager::new(&config.cache).await?);
        let directories = Directories::from_config(&config.directory).await?;
        let emitter = build_emitter(&config.notification)?;
        Ok(Self {
            store,
            leases,
            directories,
            emitter,
        })
    }

    /// Probe the enrollment store and the lease store.
    pub async fn health_check(&self) -> Vec<ComponentHealth> {
        let (store, leases) =
            futures::join!(self.store.health_check(), self.leases.health_check());
        [("enrollment_store", store), ("lease_store", leases)]
            .into_iter()
            .map(|(name, result)| match result {
                Ok(healthy) => ComponentHealth {
                    name,
                    healthy,
                    detail: None,
                },
                Err(e) => ComponentHealth {
                    name,
                    healthy: false,
                    detail: Some(e.to_string()),
                },
            })
            .collect()
    }
}

/// Every service, sharing one set of backends.
#[derive(Clone)]
pub struct Services {
    /// Course selection.
    pub admission: AdmissionService,
    /// Withdrawal and enrollment listing.
    pub enrollment: EnrollmentService,
    /// Candidate course listing.
    pub catalog: CatalogService,
    /// Score updates.
    pub grading: GradingService,
}

impl Services {
    /// Build the services over `backends`.
    pub fn new(backends: &Backends, config: &AdmissionConfig) -> Self {
        let notifier = NotificationService::new(backends.emitter.clone());
        let locks = LockManager::new(backends.leases.clone(), config.lock_ttl());
        let courses = backends.directories.courses.clone();
        let students = backends.directories.students.clone();

        Self {
            admission: AdmissionService::new(
                backends.store.clone(),
                courses.clone(),
                students.clone(),
                locks,
                notifier.clone(),
                config.clone(),
            ),
            enrollment: EnrollmentService::new(
                backends.store.clone(),
                courses.clone(),
                students,
                notifier,
            ),
            catalog: CatalogService::new(backends.store.clone(), courses, config),
            grading: GradingService::new(backends.store.clone()),
        }
    }
}
