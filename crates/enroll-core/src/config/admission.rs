//! Admission engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which identifiers the admission lease key is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// One lease per (student, course) pair.
    #[default]
    Pair,
    /// One lease per course; serializes every admission into that course.
    Course,
}

/// Tuning knobs for the admission engine and the candidate listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Credit ceiling a student's Selected courses may not exceed.
    #[serde(default = "default_max_credits")]
    pub max_credits: f64,
    /// TTL of an admission lease in seconds.
    #[serde(default = "default_lock_ttl")]
    pub lock_ttl_seconds: u64,
    /// Lease key scope.
    #[serde(default)]
    pub lock_scope: LockScope,
    /// Page size used when pulling the open-course catalogue.
    #[serde(default = "default_batch_size")]
    pub listing_batch_size: u64,
    /// Upper bound on catalogue pages pulled for one listing.
    #[serde(default = "default_max_pages")]
    pub listing_max_pages: u64,
}

impl AdmissionConfig {
    /// Lease TTL as a [`Duration`].
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_seconds)
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_credits: default_max_credits(),
            lock_ttl_seconds: default_lock_ttl(),
            lock_scope: LockScope::default(),
            listing_batch_size: default_batch_size(),
            listing_max_pages: default_max_pages(),
        }
    }
}

fn default_max_credits() -> f64 {
    30.0
}

fn default_lock_ttl() -> u64 {
    10
}

fn default_batch_size() -> u64 {
    100
}

fn default_max_pages() -> u64 {
    100
}
