//! Concrete PostgreSQL repositories.

pub mod enrollment;

pub use enrollment::EnrollmentRepository;
