//! Key builders for every entry EnrollHub writes to the shared store.

use enroll_core::types::id::{CourseId, StudentId};

/// Prefix applied to all admission lock keys.
const LOCK_PREFIX: &str = "enroll:lock";

/// Lease key serializing admissions of one student into one course.
pub fn admission_pair(student_id: &StudentId, course_id: &CourseId) -> String {
    format!("{LOCK_PREFIX}:{student_id}:{course_id}")
}

/// Lease key serializing all admissions into one course.
pub fn admission_course(course_id: &CourseId) -> String {
    format!("{LOCK_PREFIX}:course:{course_id}")
}
