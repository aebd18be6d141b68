//! The admission engine.

pub mod load;
pub mod rules;
pub mod service;

pub use load::StudentLoad;
pub use service::AdmissionService;
