//! # enroll-database
//!
//! The enrollment store. [`EnrollmentStore`] is the narrow keyed-record
//! contract the admission engine relies on; it is implemented by a
//! PostgreSQL repository and by an in-memory map used in tests and
//! single-process runs.

pub mod connection;
pub mod factory;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use factory::build_store;
pub use memory::MemoryEnrollmentStore;
pub use repositories::EnrollmentRepository;
pub use store::{EnrollmentFilter, EnrollmentStore};
