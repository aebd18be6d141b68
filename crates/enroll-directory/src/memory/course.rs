//! In-memory course directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, SeatUpdate};
use enroll_core::types::directory::{CourseQuery, CourseSnapshot};
use enroll_core::types::id::CourseId;

/// Course directory held in a concurrent map.
///
/// Seat updates run under the entry's shard lock, so the capacity guard
/// and the increment are one atomic step, like the remote service.
#[derive(Debug, Clone, Default)]
pub struct MemoryCourseDirectory {
    courses: Arc<DashMap<CourseId, CourseSnapshot>>,
}

impl MemoryCourseDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding `courses`.
    pub fn with_courses(courses: impl IntoIterator<Item = CourseSnapshot>) -> Self {
        let directory = Self::new();
        for course in courses {
            directory.upsert(course);
        }
        directory
    }

    /// Insert or replace a course.
    pub fn upsert(&self, course: CourseSnapshot) {
        self.courses.insert(course.id, course);
    }

    /// Current seat count of a course.
    pub fn seat_count(&self, course_id: &CourseId) -> Option<u32> {
        self.courses.get(course_id).and_then(|c| c.seat_count)
    }
}

fn matches_keyword(course: &CourseSnapshot, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&needle));
    contains(Some(course.name.as_str()))
        || contains(course.code.as_deref())
        || contains(course.teacher_name.as_deref())
}

#[async_trait]
impl CourseDirectory for MemoryCourseDirectory {
    async fn get(&self, course_id: &CourseId) -> AppResult<Option<CourseSnapshot>> {
        Ok(self.courses.get(course_id).map(|c| c.clone()))
    }

    async fn increment_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        let Some(mut course) = self.courses.get_mut(course_id) else {
            return Ok(SeatUpdate::Rejected);
        };
        if course.is_full() {
            return Ok(SeatUpdate::Full);
        }
        course.seat_count = Some(course.seat_count.unwrap_or(0) + 1);
        Ok(SeatUpdate::Applied)
    }

    async fn decrement_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        let Some(mut course) = self.courses.get_mut(course_id) else {
            return Ok(SeatUpdate::Rejected);
        };
        match course.seat_count {
            Some(seats) if seats > 0 => {
                course.seat_count = Some(seats - 1);
                Ok(SeatUpdate::Applied)
            }
            _ => Ok(SeatUpdate::Full),
        }
    }

    async fn list_open(&self, query: &CourseQuery) -> AppResult<Vec<CourseSnapshot>> {
        let mut courses: Vec<CourseSnapshot> = self
            .courses
            .iter()
            .filter(|c| {
                query
                    .keyword
                    .as_deref()
                    .filter(|k| !k.is_empty())
                    .is_none_or(|k| matches_keyword(c.value(), k))
            })
            .map(|c| c.clone())
            .collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.0.cmp(&b.id.0)));

        let size = query.page_size.max(1) as usize;
        let skip = (query.page.max(1) as usize - 1) * size;
        Ok(courses.into_iter().skip(skip).take(size).collect())
    }
}
