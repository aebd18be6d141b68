//! Enrollment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use enroll_core::error::{AppError, ErrorKind};
use enroll_core::result::AppResult;
use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};
use enroll_core::types::pagination::{PageRequest, PageResponse};
use enroll_entity::enrollment::Enrollment;

use crate::store::{EnrollmentFilter, EnrollmentStore};

/// PostgreSQL-backed enrollment store.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentStore for EnrollmentRepository {
    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> AppResult<Option<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find enrollment", e))
    }

    async fn find_by_student(&self, student_id: &StudentId) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE student_id = $1 ORDER BY created_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list student enrollments", e)
        })
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> AppResult<Option<Enrollment>> {
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find enrollment", e))
    }

    async fn insert(&self, record: &Enrollment) -> AppResult<EnrollmentId> {
        sqlx::query_scalar::<_, EnrollmentId>(
            "INSERT INTO enrollments (id, student_id, course_id, status, enrollment_time, score, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(record.id)
        .bind(record.student_id)
        .bind(record.course_id)
        .bind(record.status)
        .bind(record.enrollment_time)
        .bind(record.score)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert enrollment", e))
    }

    async fn update_by_id(&self, record: &Enrollment) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE enrollments SET status = $2, enrollment_time = $3, score = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(record.status)
        .bind(record.enrollment_time)
        .bind(record.score)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update enrollment", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Enrollment {} not found",
                record.id
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &EnrollmentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete enrollment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_page(
        &self,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Enrollment>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments \
             WHERE ($1::uuid IS NULL OR student_id = $1) AND ($2::uuid IS NULL OR course_id = $2)",
        )
        .bind(filter.student_id)
        .bind(filter.course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count enrollments", e))?;

        let items = sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments \
             WHERE ($1::uuid IS NULL OR student_id = $1) AND ($2::uuid IS NULL OR course_id = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.student_id)
        .bind(filter.course_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list enrollments", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
