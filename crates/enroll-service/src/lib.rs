//! # enroll-service
//!
//! Business logic service layer for EnrollHub. The admission engine is
//! the heart of it: it validates a request against the remote
//! directories, takes a lease, re-validates, commits locally and on the
//! remote seat counter, and releases the lease on every path.
//!
//! Services follow constructor injection. All collaborators are provided
//! at construction time as `Arc` trait objects, so every service is
//! cheap to clone into request tasks.

pub mod admission;
pub mod catalog;
pub mod enrollment;
pub mod grading;
pub mod lock;
pub mod notification;
pub mod registry;

#[cfg(test)]
mod testing;

pub use admission::AdmissionService;
pub use catalog::CatalogService;
pub use enrollment::EnrollmentService;
pub use grading::{BatchReport, GradingService, ScoreUpdate};
pub use lock::{LeaseGuard, LockManager};
pub use notification::{BroadcastEmitter, LogEmitter, NotificationService};
pub use registry::{Backends, ComponentHealth, Services};
