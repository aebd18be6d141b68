//! The enrollment store contract.

use async_trait::async_trait;

use enroll_core::result::AppResult;
use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};
use enroll_core::types::pagination::{PageRequest, PageResponse};
use enroll_entity::enrollment::Enrollment;

/// Optional filters for [`EnrollmentStore::find_page`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentFilter {
    /// Only records of this student.
    pub student_id: Option<StudentId>,
    /// Only records of this course.
    pub course_id: Option<CourseId>,
}

impl EnrollmentFilter {
    /// Whether `record` passes the filter.
    pub fn matches(&self, record: &Enrollment) -> bool {
        self.student_id.is_none_or(|id| record.student_id == id)
            && self.course_id.is_none_or(|id| record.course_id == id)
    }
}

/// Local keyed record store for enrollments.
///
/// Per-pair uniqueness is maintained by the admission engine through its
/// pre-lock and in-lock lookups. Implementations may additionally refuse
/// a duplicate pair on insert, but callers never rely on that.
#[async_trait]
pub trait EnrollmentStore: Send + Sync + 'static {
    /// Find the record of one `(student, course)` pair.
    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> AppResult<Option<Enrollment>>;

    /// All records of one student, in any status.
    async fn find_by_student(&self, student_id: &StudentId) -> AppResult<Vec<Enrollment>>;

    /// Find a record by id.
    async fn find_by_id(&self, id: &EnrollmentId) -> AppResult<Option<Enrollment>>;

    /// Insert a new record and return its id.
    async fn insert(&self, record: &Enrollment) -> AppResult<EnrollmentId>;

    /// Overwrite the mutable fields of an existing record.
    async fn update_by_id(&self, record: &Enrollment) -> AppResult<()>;

    /// Delete a record. Only used to compensate a failed admission.
    async fn delete_by_id(&self, id: &EnrollmentId) -> AppResult<bool>;

    /// One page of records matching `filter`, newest first.
    async fn find_page(
        &self,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Enrollment>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
