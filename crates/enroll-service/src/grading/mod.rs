//! Score updates.

pub mod service;

pub use service::{BatchFailure, BatchReport, GradingService, ScoreUpdate};
