//! Collaborator traits defined in `enroll-core` and implemented by other crates.

pub mod directory;
pub mod lease_store;
pub mod notification;

pub use directory::{CourseDirectory, SeatUpdate, StudentDirectory};
pub use lease_store::LeaseStore;
pub use notification::NotificationEmitter;
