//! Withdrawal and enrollment listing.

pub mod service;

pub use service::EnrollmentService;
