//! Course selection: validate, lease, re-validate, commit, propagate, release.

use std::sync::Arc;

use tracing::{error, info, warn};

use enroll_cache::keys;
use enroll_core::config::{AdmissionConfig, LockScope};
use enroll_core::error::{AppError, ErrorKind};
use enroll_core::events::{EnrollmentEvent, EventPayload};
use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, SeatUpdate, StudentDirectory};
use enroll_core::types::directory::CourseSnapshot;
use enroll_core::types::id::{CourseId, StudentId};
use enroll_database::store::EnrollmentStore;
use enroll_entity::enrollment::{Enrollment, EnrollmentView};

use super::load::StudentLoad;
use super::rules;
use crate::lock::LockManager;
use crate::notification::NotificationService;

/// Decides and commits course selections under concurrency.
#[derive(Clone)]
pub struct AdmissionService {
    store: Arc<dyn EnrollmentStore>,
    courses: Arc<dyn CourseDirectory>,
    students: Arc<dyn StudentDirectory>,
    locks: LockManager,
    notifier: NotificationService,
    config: AdmissionConfig,
}

/// What the in-lease section committed.
struct Committed {
    record: Enrollment,
    course: CourseSnapshot,
}

impl AdmissionService {
    /// Creates a new admission service.
    pub fn new(
        store: Arc<dyn EnrollmentStore>,
        courses: Arc<dyn CourseDirectory>,
        students: Arc<dyn StudentDirectory>,
        locks: LockManager,
        notifier: NotificationService,
        config: AdmissionConfig,
    ) -> Self {
        Self {
            store,
            courses,
            students,
            locks,
            notifier,
            config,
        }
    }

    /// The lease key guarding admissions of `student_id` into `course_id`.
    pub fn lock_key(&self, student_id: &StudentId, course_id: &CourseId) -> String {
        match self.config.lock_scope {
            LockScope::Pair => keys::admission_pair(student_id, course_id),
            LockScope::Course => keys::admission_course(course_id),
        }
    }

    /// Admit `student_id` into `course_id`.
    ///
    /// Checks run twice: optimistically before the lease, and again on
    /// fresh state inside it. The remote seat increment is authoritative;
    /// when it does not apply, the local commit is undone before the error
    /// is returned.
    pub async fn select_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> AppResult<EnrollmentView> {
        let existing = self.store.find_by_pair(&student_id, &course_id).await?;
        if existing.as_ref().is_some_and(Enrollment::is_selected) {
            return Err(AppError::already_enrolled(format!(
                "Student {student_id} already holds course {course_id}"
            )));
        }

        let student = self
            .students
            .get(&student_id)
            .await?
            .ok_or_else(|| AppError::student_not_found(format!("Student {student_id} not found")))?;

        let course = self
            .courses
            .get(&course_id)
            .await?
            .ok_or_else(|| AppError::course_not_found(format!("Course {course_id} not found")))?;

        rules::ensure_seat_free(&course)?;

        let load = StudentLoad::gather(self.store.as_ref(), self.courses.as_ref(), &student_id).await?;
        rules::ensure_no_conflict(&course, &load)?;
        rules::ensure_credit_room(&course, &load, self.config.max_credits)?;

        let key = self.lock_key(&student_id, &course_id);
        let Some(lease) = self.locks.try_lock(key).await? else {
            info!(student_id = %student_id, course_id = %course_id, "Admission lease contended");
            return Err(AppError::lock_contention(
                "Another selection for this course is in progress, retry later",
            ));
        };

        let outcome = self.commit_under_lease(&student_id, &course_id).await;
        lease.release().await;
        let Committed { record, course } = outcome?;

        info!(
            enrollment_id = %record.id,
            student_id = %student_id,
            course_id = %course_id,
            "Course selected"
        );

        self.notifier
            .emit(EnrollmentEvent::new(EventPayload::SelectionSucceeded {
                enrollment_id: record.id,
                student_id,
                student_name: student.name.clone(),
                course_id,
                course_name: course.name.clone(),
                teacher_id: course.teacher_id,
            }));

        Ok(EnrollmentView::project(&record, Some(&student), Some(&course)))
    }

    /// Re-validate on fresh state, commit locally, then take the remote seat.
    async fn commit_under_lease(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> AppResult<Committed> {
        let existing = self.store.find_by_pair(student_id, course_id).await?;
        if existing.as_ref().is_some_and(Enrollment::is_selected) {
            return Err(AppError::already_enrolled(format!(
                "Student {student_id} already holds course {course_id}"
            )));
        }

        let course = self
            .courses
            .get(course_id)
            .await?
            .ok_or_else(|| AppError::course_not_found(format!("Course {course_id} not found")))?;
        rules::ensure_seat_free(&course)?;

        let (record, prior) = match existing {
            Some(withdrawn) => {
                let mut record = withdrawn.clone();
                record.reactivate();
                self.store.update_by_id(&record).await?;
                (record, Some(withdrawn))
            }
            None => {
                let record = Enrollment::selected(*student_id, *course_id);
                self.store.insert(&record).await?;
                (record, None)
            }
        };

        let failure = match self.courses.increment_seat(course_id).await {
            Ok(SeatUpdate::Applied) => return Ok(Committed { record, course }),
            Ok(SeatUpdate::Full) => AppError::capacity_exceeded(format!(
                "Course '{}' filled up before the seat was taken",
                course.name
            )),
            Ok(SeatUpdate::Rejected) => AppError::remote_update_failed(format!(
                "Course directory refused the seat increment for {course_id}"
            )),
            Err(e) => AppError::with_source(
                ErrorKind::RemoteUpdateFailed,
                format!("Seat increment for {course_id} failed"),
                e,
            ),
        };

        warn!(
            student_id = %student_id,
            course_id = %course_id,
            error = %failure,
            "Seat increment did not apply, undoing local commit"
        );
        self.undo_commit(&record, prior).await;
        Err(failure)
    }

    /// Restore the store to its state before the commit.
    ///
    /// A failed undo leaves a Selected record without a remote seat; it is
    /// logged and the caller still gets the original error.
    async fn undo_commit(&self, record: &Enrollment, prior: Option<Enrollment>) {
        let result = match prior {
            Some(prior) => self.store.update_by_id(&prior).await,
            None => self.store.delete_by_id(&record.id).await.map(|_| ()),
        };
        if let Err(e) = result {
            error!(
                enrollment_id = %record.id,
                student_id = %record.student_id,
                course_id = %record.course_id,
                error = %e,
                "Failed to undo enrollment commit, local record and seat counter disagree"
            );
        }
    }
}
