//! # enroll-core
//!
//! Core crate for EnrollHub. Contains the collaborator traits the admission
//! engine talks through, configuration schemas, typed identifiers, remote
//! directory snapshots, domain events, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other EnrollHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
