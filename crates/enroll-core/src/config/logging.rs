//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Crates whose output follows `level`; everything else stays at `warn`.
const OWN_TARGETS: [&str; 7] = [
    "enrollhub",
    "enroll_core",
    "enroll_entity",
    "enroll_database",
    "enroll_cache",
    "enroll_directory",
    "enroll_service",
];

/// Tracing output settings for the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for EnrollHub's own crates: `"trace"` through `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Whether records should be emitted as JSON lines.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// An `EnvFilter` directive string: `warn` globally, `level` for our crates.
    pub fn filter_directive(&self) -> String {
        OWN_TARGETS
            .iter()
            .fold(String::from("warn"), |mut acc, target| {
                acc.push_str(&format!(",{target}={}", self.level));
                acc
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
