//! Directory selection from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use enroll_core::config::DirectoryConfig;
use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, StudentDirectory};

use crate::http::{HttpCourseDirectory, HttpStudentDirectory, build_client};
use crate::memory::{DirectorySeed, MemoryCourseDirectory, MemoryStudentDirectory};

/// The pair of directories the admission engine reads from.
#[derive(Clone)]
pub struct Directories {
    /// Course directory.
    pub courses: Arc<dyn CourseDirectory>,
    /// Student directory.
    pub students: Arc<dyn StudentDirectory>,
}

impl Directories {
    /// Build the directories named by `config.provider`.
    pub async fn from_config(config: &DirectoryConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "http" => {
                let client = build_client(Duration::from_secs(config.request_timeout_seconds))?;
                info!(
                    course_url = %config.course_base_url,
                    student_url = %config.student_base_url,
                    "Using HTTP directories"
                );
                Ok(Self {
                    courses: Arc::new(HttpCourseDirectory::new(
                        client.clone(),
                        config.course_base_url.clone(),
                    )),
                    students: Arc::new(HttpStudentDirectory::new(
                        client,
                        config.student_base_url.clone(),
                    )),
                })
            }
            "memory" => {
                let seed = match &config.seed_file {
                    Some(path) => DirectorySeed::load(path).await?,
                    None => DirectorySeed::default(),
                };
                info!(
                    courses = seed.courses.len(),
                    students = seed.students.len(),
                    "Using in-memory directories"
                );
                Ok(Self {
                    courses: Arc::new(MemoryCourseDirectory::with_courses(seed.courses)),
                    students: Arc::new(MemoryStudentDirectory::with_students(seed.students)),
                })
            }
            other => Err(AppError::configuration(format!(
                "Unknown directory provider: '{other}'. Supported: memory, http"
            ))),
        }
    }
}
