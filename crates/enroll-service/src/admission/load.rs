//! A student's current course load, read from the store and the course directory.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use enroll_core::result::AppResult;
use enroll_core::traits::directory::CourseDirectory;
use enroll_core::types::directory::ScheduleWindow;
use enroll_core::types::id::{CourseId, StudentId};
use enroll_database::store::EnrollmentStore;

/// Courses a student currently holds, with their schedules and credits.
#[derive(Debug, Clone, Default)]
pub struct StudentLoad {
    /// Courses with a Selected enrollment.
    pub selected: HashSet<CourseId>,
    /// Schedule windows of the selected courses that have one.
    pub windows: Vec<ScheduleWindow>,
    /// Sum of the credit weights of the selected courses.
    pub credits: f64,
}

impl StudentLoad {
    /// Read the load of `student_id`.
    ///
    /// Selected courses whose snapshot cannot be read still count as
    /// selected but contribute no schedule window and no credits.
    pub async fn gather(
        store: &dyn EnrollmentStore,
        courses: &dyn CourseDirectory,
        student_id: &StudentId,
    ) -> AppResult<Self> {
        let selected: HashSet<CourseId> = store
            .find_by_student(student_id)
            .await?
            .into_iter()
            .filter(|e| e.is_selected())
            .map(|e| e.course_id)
            .collect();

        let snapshots = join_all(selected.iter().map(|id| courses.get(id))).await;

        let mut load = Self {
            selected: selected.clone(),
            ..Self::default()
        };
        for (course_id, snapshot) in selected.iter().zip(snapshots) {
            match snapshot {
                Ok(Some(course)) => {
                    load.windows.extend(course.schedule());
                    load.credits += course.credit.unwrap_or(0.0);
                }
                Ok(None) => {
                    warn!(student_id = %student_id, course_id = %course_id, "Enrolled course missing from directory");
                }
                Err(e) => {
                    warn!(student_id = %student_id, course_id = %course_id, error = %e, "Failed to read enrolled course");
                }
            }
        }
        Ok(load)
    }
}
