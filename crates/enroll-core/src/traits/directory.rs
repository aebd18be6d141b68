//! Read and seat-counter contracts for the remote course and student directories.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::directory::{CourseQuery, CourseSnapshot, StudentSnapshot};
use crate::types::id::{CourseId, StudentId};

/// Outcome of an atomic seat counter mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SeatUpdate {
    /// The counter was changed.
    Applied,
    /// The counter is already at capacity (increment) or at zero (decrement).
    Full,
    /// The directory refused the change for another reason.
    Rejected,
}

impl SeatUpdate {
    /// Whether the counter was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Remote source of truth for course capacity, seats, credit and schedule.
///
/// The engine never writes the seat counter directly. It only asks the
/// directory to increment or decrement it and treats the answer as final.
#[async_trait]
pub trait CourseDirectory: Send + Sync + 'static {
    /// Read one course. `Ok(None)` means the directory has no such course.
    async fn get(&self, course_id: &CourseId) -> AppResult<Option<CourseSnapshot>>;

    /// Take one seat, refusing with [`SeatUpdate::Full`] at capacity.
    async fn increment_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate>;

    /// Free one seat.
    async fn decrement_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate>;

    /// Read one page of the open-course catalogue.
    async fn list_open(&self, query: &CourseQuery) -> AppResult<Vec<CourseSnapshot>>;
}

/// Remote source of truth for student profiles. Read-only.
#[async_trait]
pub trait StudentDirectory: Send + Sync + 'static {
    /// Read one student. `Ok(None)` means the directory has no such student.
    async fn get(&self, student_id: &StudentId) -> AppResult<Option<StudentSnapshot>>;
}
