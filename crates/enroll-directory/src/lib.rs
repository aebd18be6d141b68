//! # enroll-directory
//!
//! Clients for the remote course and student directories. The HTTP
//! clients speak the course and student services' JSON envelope; the
//! in-memory directories back tests and single-process runs and keep the
//! same atomic, capacity-guarded seat counter semantics.

pub mod factory;
pub mod http;
pub mod memory;

pub use factory::Directories;
pub use http::{HttpCourseDirectory, HttpStudentDirectory};
pub use memory::{DirectorySeed, MemoryCourseDirectory, MemoryStudentDirectory};
