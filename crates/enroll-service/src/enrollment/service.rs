//! Withdrawal and enriched enrollment listing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use enroll_core::error::AppError;
use enroll_core::events::{EnrollmentEvent, EventPayload};
use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, SeatUpdate, StudentDirectory};
use enroll_core::types::directory::{CourseSnapshot, StudentSnapshot};
use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};
use enroll_core::types::pagination::{PageRequest, PageResponse};
use enroll_database::store::{EnrollmentFilter, EnrollmentStore};
use enroll_entity::enrollment::{Enrollment, EnrollmentView};

use crate::notification::NotificationService;

/// Manages withdrawal and listing of enrollment records.
#[derive(Clone)]
pub struct EnrollmentService {
    store: Arc<dyn EnrollmentStore>,
    courses: Arc<dyn CourseDirectory>,
    students: Arc<dyn StudentDirectory>,
    notifier: NotificationService,
}

impl EnrollmentService {
    /// Creates a new enrollment service.
    pub fn new(
        store: Arc<dyn EnrollmentStore>,
        courses: Arc<dyn CourseDirectory>,
        students: Arc<dyn StudentDirectory>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            store,
            courses,
            students,
            notifier,
        }
    }

    /// Withdraw `student_id` from the enrollment `enrollment_id`.
    ///
    /// Takes no lease: a withdrawal only ever frees a seat. The remote
    /// decrement is best effort; the withdrawal stands even if it fails.
    /// Withdrawing an already withdrawn record changes nothing.
    pub async fn cancel(
        &self,
        enrollment_id: EnrollmentId,
        student_id: StudentId,
    ) -> AppResult<Enrollment> {
        let mut record = self
            .store
            .find_by_id(&enrollment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Enrollment {enrollment_id} not found")))?;

        if !record.is_owned_by(&student_id) {
            return Err(AppError::forbidden(format!(
                "Enrollment {enrollment_id} does not belong to student {student_id}"
            )));
        }

        if !record.is_selected() {
            info!(enrollment_id = %enrollment_id, "Enrollment already withdrawn");
            return Ok(record);
        }

        record.withdraw();
        self.store.update_by_id(&record).await?;

        match self.courses.decrement_seat(&record.course_id).await {
            Ok(SeatUpdate::Applied) => {}
            Ok(update) => warn!(
                course_id = %record.course_id,
                ?update,
                "Seat decrement did not apply"
            ),
            Err(e) => warn!(
                course_id = %record.course_id,
                error = %e,
                "Seat decrement failed"
            ),
        }

        info!(
            enrollment_id = %enrollment_id,
            student_id = %student_id,
            course_id = %record.course_id,
            "Course withdrawn"
        );

        self.notifier
            .emit(EnrollmentEvent::new(EventPayload::SelectionWithdrawn {
                enrollment_id,
                student_id,
                course_id: record.course_id,
            }));

        Ok(record)
    }

    /// One page of enrollments, newest first, with display fields filled in.
    ///
    /// Directory lookups that fail fall back to placeholder names instead
    /// of failing the page.
    pub async fn list_enrollments(
        &self,
        filter: EnrollmentFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<EnrollmentView>> {
        let records = self.store.find_page(&filter, &page).await?;

        let student_ids: HashSet<StudentId> = records.items.iter().map(|r| r.student_id).collect();
        let course_ids: HashSet<CourseId> = records.items.iter().map(|r| r.course_id).collect();

        let (students, courses) = futures::join!(
            self.lookup_students(student_ids),
            self.lookup_courses(course_ids)
        );

        Ok(records.map(|record| {
            EnrollmentView::project(
                &record,
                students.get(&record.student_id),
                courses.get(&record.course_id),
            )
        }))
    }

    async fn lookup_students(&self, ids: HashSet<StudentId>) -> HashMap<StudentId, StudentSnapshot> {
        let results = join_all(ids.iter().map(|id| self.students.get(id))).await;
        ids.into_iter()
            .zip(results)
            .filter_map(|(id, result)| match result {
                Ok(snapshot) => snapshot.map(|s| (id, s)),
                Err(e) => {
                    warn!(student_id = %id, error = %e, "Failed to read student for listing");
                    None
                }
            })
            .collect()
    }

    async fn lookup_courses(&self, ids: HashSet<CourseId>) -> HashMap<CourseId, CourseSnapshot> {
        let results = join_all(ids.iter().map(|id| self.courses.get(id))).await;
        ids.into_iter()
            .zip(results)
            .filter_map(|(id, result)| match result {
                Ok(snapshot) => snapshot.map(|c| (id, c)),
                Err(e) => {
                    warn!(course_id = %id, error = %e, "Failed to read course for listing");
                    None
                }
            })
            .collect()
    }
}
