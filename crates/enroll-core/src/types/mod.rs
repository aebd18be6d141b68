//! Shared domain types: identifiers, remote snapshots, and pagination.

pub mod directory;
pub mod id;
pub mod pagination;

pub use directory::{CourseQuery, CourseSnapshot, ScheduleWindow, StudentSnapshot};
pub use id::{CourseId, EnrollmentId, StudentId, TeacherId};
pub use pagination::{PageRequest, PageResponse};
