//! In-memory enrollment store for tests and single-process runs.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};
use enroll_core::types::pagination::{PageRequest, PageResponse};
use enroll_entity::enrollment::Enrollment;

use crate::store::{EnrollmentFilter, EnrollmentStore};

/// Enrollment store backed by concurrent maps.
///
/// A secondary `(student, course)` index mirrors the unique constraint of
/// the PostgreSQL table so both backends refuse a duplicate pair.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnrollmentStore {
    records: Arc<DashMap<EnrollmentId, Enrollment>>,
    pairs: Arc<DashMap<(StudentId, CourseId), EnrollmentId>>,
}

impl MemoryEnrollmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> AppResult<Option<Enrollment>> {
        let id = match self.pairs.get(&(*student_id, *course_id)) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_by_student(&self, student_id: &StudentId) -> AppResult<Vec<Enrollment>> {
        let mut records: Vec<Enrollment> = self
            .records
            .iter()
            .filter(|r| r.student_id == *student_id)
            .map(|r| r.clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> AppResult<Option<Enrollment>> {
        Ok(self.records.get(id).map(|r| r.clone()))
    }

    async fn insert(&self, record: &Enrollment) -> AppResult<EnrollmentId> {
        match self.pairs.entry((record.student_id, record.course_id)) {
            Entry::Occupied(_) => Err(AppError::database(format!(
                "Enrollment for student {} and course {} already exists",
                record.student_id, record.course_id
            ))),
            Entry::Vacant(slot) => {
                self.records.insert(record.id, record.clone());
                slot.insert(record.id);
                Ok(record.id)
            }
        }
    }

    async fn update_by_id(&self, record: &Enrollment) -> AppResult<()> {
        match self.records.get_mut(&record.id) {
            Some(mut stored) => {
                stored.status = record.status;
                stored.enrollment_time = record.enrollment_time;
                stored.score = record.score;
                stored.updated_at = record.updated_at;
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Enrollment {} not found",
                record.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: &EnrollmentId) -> AppResult<bool> {
        match self.records.remove(id) {
            Some((_, record)) => {
                self.pairs
                    .remove_if(&(record.student_id, record.course_id), |_, v| v == id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_page(
        &self,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Enrollment>> {
        let mut matching: Vec<Enrollment> = self
            .records
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(PageResponse::from_full(matching, page))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
