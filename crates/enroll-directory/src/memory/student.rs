//! In-memory student directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use enroll_core::result::AppResult;
use enroll_core::traits::directory::StudentDirectory;
use enroll_core::types::directory::StudentSnapshot;
use enroll_core::types::id::StudentId;

/// Student directory held in a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStudentDirectory {
    students: Arc<DashMap<StudentId, StudentSnapshot>>,
}

impl MemoryStudentDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding `students`.
    pub fn with_students(students: impl IntoIterator<Item = StudentSnapshot>) -> Self {
        let directory = Self::new();
        for student in students {
            directory.upsert(student);
        }
        directory
    }

    /// Insert or replace a student.
    pub fn upsert(&self, student: StudentSnapshot) {
        self.students.insert(student.id, student);
    }
}

#[async_trait]
impl StudentDirectory for MemoryStudentDirectory {
    async fn get(&self, student_id: &StudentId) -> AppResult<Option<StudentSnapshot>> {
        Ok(self.students.get(student_id).map(|s| s.clone()))
    }
}
