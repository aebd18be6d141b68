//! Display projection of an enrollment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use enroll_core::types::directory::{CourseSnapshot, StudentSnapshot};
use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};

use super::model::Enrollment;
use super::status::EnrollmentStatus;

/// Placeholder shown when the student directory could not be read.
pub const UNKNOWN_STUDENT: &str = "Unknown student";
/// Placeholder shown when the course directory could not be read.
pub const UNKNOWN_COURSE: &str = "Unknown course";

/// Enrollment enriched with course and student display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentView {
    /// Enrollment id.
    pub id: EnrollmentId,
    /// Status.
    pub status: EnrollmentStatus,
    /// When the record last transitioned to Selected.
    pub enrollment_time: DateTime<Utc>,
    /// Grade.
    pub score: Option<f64>,
    /// Created.
    pub created_at: DateTime<Utc>,
    /// Updated.
    pub updated_at: DateTime<Utc>,
    /// Student id.
    pub student_id: StudentId,
    /// Student display name.
    pub student_name: String,
    /// Student number.
    pub student_no: Option<String>,
    /// Course id.
    pub course_id: CourseId,
    /// Course display name.
    pub course_name: String,
    /// Course code.
    pub course_code: Option<String>,
    /// Teacher display name.
    pub teacher_name: Option<String>,
    /// Credit weight.
    pub credit: Option<f64>,
    /// Schedule start.
    pub schedule_start: Option<DateTime<Utc>>,
    /// Schedule end.
    pub schedule_end: Option<DateTime<Utc>>,
}

impl EnrollmentView {
    /// Project a record, falling back to placeholders for missing snapshots.
    pub fn project(
        enrollment: &Enrollment,
        student: Option<&StudentSnapshot>,
        course: Option<&CourseSnapshot>,
    ) -> Self {
        Self {
            id: enrollment.id,
            status: enrollment.status,
            enrollment_time: enrollment.enrollment_time,
            score: enrollment.score,
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
            student_id: enrollment.student_id,
            student_name: student
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
            student_no: student.and_then(|s| s.student_no.clone()),
            course_id: enrollment.course_id,
            course_name: course
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_string()),
            course_code: course.and_then(|c| c.code.clone()),
            teacher_name: course.and_then(|c| c.teacher_name.clone()),
            credit: course.and_then(|c| c.credit),
            schedule_start: course.and_then(|c| c.schedule_start),
            schedule_end: course.and_then(|c| c.schedule_end),
        }
    }
}
