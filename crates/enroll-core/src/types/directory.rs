//! Snapshots read from the remote course and student directories.
//!
//! These are not owned by the admission engine. They are read fresh at
//! each decision point because the directories may change between reads.
//! The capacity and schedule predicates live here so that admission and
//! the candidate listing evaluate exactly the same rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CourseId, StudentId, TeacherId};

/// A half-open `[start, end)` schedule interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl ScheduleWindow {
    /// Create a window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether two windows share any instant. Touching endpoints do not.
    pub fn overlaps(&self, other: &ScheduleWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Course state as reported by the course directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSnapshot {
    /// Course identifier.
    pub id: CourseId,
    /// Display name.
    pub name: String,
    /// Course code.
    pub code: Option<String>,
    /// Teaching staff member.
    pub teacher_id: Option<TeacherId>,
    /// Teacher display name.
    pub teacher_name: Option<String>,
    /// Owning department.
    pub department: Option<String>,
    /// Credit weight. `None` means the course does not count.
    pub credit: Option<f64>,
    /// Seat capacity. `None` means unbounded.
    pub capacity: Option<u32>,
    /// Seats currently taken. `None` means unknown, treated as unbounded.
    pub seat_count: Option<u32>,
    /// Scheduled start.
    pub schedule_start: Option<DateTime<Utc>>,
    /// Scheduled end.
    pub schedule_end: Option<DateTime<Utc>>,
    /// Cover image URL.
    pub cover_image: Option<String>,
}

impl CourseSnapshot {
    /// The schedule window, if both bounds are known.
    pub fn schedule(&self) -> Option<ScheduleWindow> {
        match (self.schedule_start, self.schedule_end) {
            (Some(start), Some(end)) => Some(ScheduleWindow::new(start, end)),
            _ => None,
        }
    }

    /// Whether the seat counter has reached capacity.
    pub fn is_full(&self) -> bool {
        match (self.capacity, self.seat_count) {
            (Some(capacity), Some(seats)) => seats >= capacity,
            _ => false,
        }
    }

    /// Whether this course's schedule overlaps any of the given windows.
    pub fn conflicts_with<'a>(&self, taken: impl IntoIterator<Item = &'a ScheduleWindow>) -> bool {
        match self.schedule() {
            Some(window) => taken.into_iter().any(|other| window.overlaps(other)),
            None => false,
        }
    }
}

/// Student profile as reported by the student directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    /// Student identifier.
    pub id: StudentId,
    /// Display name.
    pub name: Option<String>,
    /// Student number.
    pub student_no: Option<String>,
    /// Major, used by the (currently permissive) eligibility rule.
    pub major: Option<String>,
}

/// One page request against the open-course catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseQuery {
    /// Page number (1-based).
    pub page: u64,
    /// Page size.
    pub page_size: u64,
    /// Optional free-text filter.
    pub keyword: Option<String>,
}
