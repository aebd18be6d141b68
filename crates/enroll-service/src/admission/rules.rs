//! Admission predicates shared by the engine and the candidate listing.

use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::types::directory::CourseSnapshot;

use super::load::StudentLoad;

/// Fail when the course has no free seat.
pub fn ensure_seat_free(course: &CourseSnapshot) -> AppResult<()> {
    if course.is_full() {
        return Err(AppError::capacity_exceeded(format!(
            "Course '{}' is full",
            course.name
        )));
    }
    Ok(())
}

/// Fail when the course overlaps one the student already holds.
pub fn ensure_no_conflict(course: &CourseSnapshot, load: &StudentLoad) -> AppResult<()> {
    if course.conflicts_with(&load.windows) {
        return Err(AppError::schedule_conflict(format!(
            "Course '{}' overlaps the current schedule",
            course.name
        )));
    }
    Ok(())
}

/// Fail when adding the course would take the student past `ceiling` credits.
pub fn ensure_credit_room(course: &CourseSnapshot, load: &StudentLoad, ceiling: f64) -> AppResult<()> {
    let Some(credit) = course.credit else {
        return Ok(());
    };
    if load.credits + credit > ceiling {
        return Err(AppError::credit_limit_exceeded(format!(
            "Selecting '{}' ({credit} credits) exceeds the limit of {ceiling} (currently {})",
            course.name, load.credits
        )));
    }
    Ok(())
}

/// Whether the listing should offer `course` to a student with `load`.
pub fn is_candidate(course: &CourseSnapshot, load: &StudentLoad) -> bool {
    !load.selected.contains(&course.id)
        && ensure_seat_free(course).is_ok()
        && ensure_no_conflict(course, load).is_ok()
}
