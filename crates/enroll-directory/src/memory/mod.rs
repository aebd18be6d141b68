//! In-memory directories.

pub mod course;
pub mod student;

pub use course::MemoryCourseDirectory;
pub use student::MemoryStudentDirectory;

use serde::{Deserialize, Serialize};

use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::types::directory::{CourseSnapshot, StudentSnapshot};

/// Preloaded content of the in-memory directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    /// Courses.
    #[serde(default)]
    pub courses: Vec<CourseSnapshot>,
    /// Students.
    #[serde(default)]
    pub students: Vec<StudentSnapshot>,
}

impl DirectorySeed {
    /// Read a seed from a JSON file.
    pub async fn load(path: &str) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                enroll_core::error::ErrorKind::Configuration,
                format!("Failed to read directory seed '{path}'"),
                e,
            )
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}
