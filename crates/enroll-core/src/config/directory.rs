//! Remote course and student directory configuration.

use serde::{Deserialize, Serialize};

/// Where course and student snapshots come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Provider type: `"memory"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the course service.
    #[serde(default = "default_course_url")]
    pub course_base_url: String,
    /// Base URL of the student service.
    #[serde(default = "default_student_url")]
    pub student_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// JSON file preloading the in-memory directories.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            course_base_url: default_course_url(),
            student_base_url: default_student_url(),
            request_timeout_seconds: default_timeout(),
            seed_file: None,
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_course_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_student_url() -> String {
    "http://localhost:8083".to_string()
}

fn default_timeout() -> u64 {
    5
}
