//! Enrollment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};

use super::status::EnrollmentStatus;

/// One student's relationship to one course.
///
/// There is at most one record per `(student_id, course_id)` pair over
/// the record's lifetime. Re-enrollment after withdrawal flips the
/// existing record back to [`EnrollmentStatus::Selected`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// Unique enrollment identifier.
    pub id: EnrollmentId,
    /// The enrolled student.
    pub student_id: StudentId,
    /// The course.
    pub course_id: CourseId,
    /// Current status.
    pub status: EnrollmentStatus,
    /// When the record last transitioned to Selected.
    pub enrollment_time: DateTime<Utc>,
    /// Grade, only set while Selected.
    pub score: Option<f64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Build a fresh Selected record for a first-time admission.
    pub fn selected(student_id: StudentId, course_id: CourseId) -> Self {
        let now = Utc::now();
        Self {
            id: EnrollmentId::new(),
            student_id,
            course_id,
            status: EnrollmentStatus::Selected,
            enrollment_time: now,
            score: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip a withdrawn record back to Selected and refresh its timestamps.
    pub fn reactivate(&mut self) {
        let now = Utc::now();
        self.status = EnrollmentStatus::Selected;
        self.enrollment_time = now;
        self.updated_at = now;
    }

    /// Mark the record withdrawn.
    pub fn withdraw(&mut self) {
        self.status = EnrollmentStatus::Withdrawn;
        self.updated_at = Utc::now();
    }

    /// Whether the record currently occupies a seat.
    pub fn is_selected(&self) -> bool {
        self.status.is_selected()
    }

    /// Whether `student_id` owns this record.
    pub fn is_owned_by(&self, student_id: &StudentId) -> bool {
        self.student_id == *student_id
    }
}
