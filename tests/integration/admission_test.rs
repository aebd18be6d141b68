//! Integration tests for course admission under contention.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use futures::future::join_all;

use enroll_core::config::{AdmissionConfig, LockScope};
use enroll_core::error::ErrorKind;
use enroll_core::traits::lease_store::LeaseStore;
use enroll_core::types::pagination::PageRequest;
use enroll_database::store::{EnrollmentFilter, EnrollmentStore};
use enroll_entity::enrollment::EnrollmentStatus;

use helpers::TestApp;

async fn selected_in(app: &TestApp, course: enroll_core::types::id::CourseId) -> usize {
    let filter = EnrollmentFilter {
        student_id: None,
        course_id: Some(course),
    };
    app.store
        .find_page(&filter, &PageRequest::new(1, 100))
        .await
        .expect("page")
        .items
        .iter()
        .filter(|r| r.status == EnrollmentStatus::Selected)
        .count()
}

async fn race_for_seats(app: Arc<TestApp>, students: usize, capacity: u32) {
    let course = app.course("Quantum Mechanics", 3.0, capacity);
    let ids: Vec<_> = (0..students).map(|_| app.student()).collect();

    let tasks = ids.into_iter().map(|student| {
        let app = app.clone();
        tokio::spawn(async move { app.services.admission.select_course(student, course).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completed"))
        .collect();

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind == ErrorKind::CapacityExceeded))
        .count();

    assert_eq!(admitted, capacity as usize);
    assert_eq!(full, students - capacity as usize);
    assert_eq!(app.courses.seat_count(&course), Some(capacity));
    assert_eq!(selected_in(&app, course).await, capacity as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_students_never_overfill_a_course() {
    race_for_seats(Arc::new(TestApp::new()), 40, 7).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_course_scope_also_holds_capacity() {
    let app = TestApp::with_config(AdmissionConfig {
        lock_scope: LockScope::Course,
        ..AdmissionConfig::default()
    });
    let app = Arc::new(app);
    let course = app.course("Thermodynamics", 3.0, 3);
    let ids: Vec<_> = (0..20).map(|_| app.student()).collect();

    let tasks = ids.into_iter().map(|student| {
        let app = app.clone();
        tokio::spawn(async move { app.services.admission.select_course(student, course).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completed"))
        .collect();

    // Losers see either a full course or a contended lease.
    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e.kind, ErrorKind::CapacityExceeded | ErrorKind::LockContention),
                "unexpected error {e}"
            );
        }
    }
    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert!(admitted <= 3);
    assert_eq!(app.courses.seat_count(&course), Some(admitted as u32));
    assert_eq!(selected_in(&app, course).await, admitted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_pair_admitted_at_most_once() {
    let app = Arc::new(TestApp::new());
    let student = app.student();
    let course = app.course("Optics", 2.0, 50);

    let tasks = (0..16).map(|_| {
        let app = app.clone();
        tokio::spawn(async move { app.services.admission.select_course(student, course).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completed"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e.kind, ErrorKind::AlreadyEnrolled | ErrorKind::LockContention),
                "unexpected error {e}"
            );
        }
    }
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.courses.seat_count(&course), Some(1));
}

#[tokio::test]
async fn test_credit_ceiling() {
    let app = TestApp::new();
    let student = app.student();
    for i in 0..4 {
        let course = app.course(&format!("Seminar {i}"), 7.0, 30);
        app.services
            .admission
            .select_course(student, course)
            .await
            .expect("within ceiling");
    }

    let three = app.course("Lab Methods", 3.0, 30);
    let err = app
        .services
        .admission
        .select_course(student, three)
        .await
        .expect_err("over ceiling");
    assert_eq!(err.kind, ErrorKind::CreditLimitExceeded);
    assert_eq!(app.courses.seat_count(&three), Some(0));

    let two = app.course("Field Trip", 2.0, 30);
    app.services
        .admission
        .select_course(student, two)
        .await
        .expect("exactly at ceiling");
}

#[tokio::test]
async fn test_touching_schedules_are_admitted() {
    let app = TestApp::new();
    let student = app.student();
    let first = app.course_at("Morning", 3.0, 10, Some((8, 10)));
    let second = app.course_at("Late Morning", 3.0, 10, Some((10, 12)));
    let clash = app.course_at("Brunch", 3.0, 10, Some((9, 11)));

    app.services.admission.select_course(student, first).await.expect("first");
    app.services.admission.select_course(student, second).await.expect("second");
    let err = app
        .services
        .admission
        .select_course(student, clash)
        .await
        .expect_err("clash");
    assert_eq!(err.kind, ErrorKind::ScheduleConflict);
}

#[tokio::test]
async fn test_contended_lease_has_no_side_effects() {
    let app = TestApp::new();
    let student = app.student();
    let course = app.course("Acoustics", 3.0, 10);
    let key = app.services.admission.lock_key(&student, &course);

    assert!(
        app.leases
            .set_nx(&key, "other-instance", Duration::from_secs(10))
            .await
            .expect("hold")
    );
    let err = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect_err("contended");
    assert_eq!(err.kind, ErrorKind::LockContention);
    assert!(app.store.is_empty());
    assert_eq!(app.courses.seat_count(&course), Some(0));

    assert!(
        app.leases
            .compare_and_delete(&key, "other-instance")
            .await
            .expect("release")
    );
    app.services
        .admission
        .select_course(student, course)
        .await
        .expect("retry succeeds");
    assert!(!app.leases.exists(&key).await.expect("exists"));
}

#[tokio::test]
async fn test_refused_increment_undoes_insert() {
    let (app, flaky) = TestApp::flaky(AdmissionConfig::default());
    let student = app.student();
    let course = app.course("Relativity", 3.0, 10);

    flaky.reject_increments.store(true, Ordering::SeqCst);
    let err = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect_err("refused");
    assert_eq!(err.kind, ErrorKind::RemoteUpdateFailed);
    assert!(app.store.is_empty());
    assert_eq!(app.courses.seat_count(&course), Some(0));
    let key = app.services.admission.lock_key(&student, &course);
    assert!(!app.leases.exists(&key).await.expect("exists"));
}

#[tokio::test]
async fn test_failed_increment_restores_withdrawn_record() {
    let (app, flaky) = TestApp::flaky(AdmissionConfig::default());
    let student = app.student();
    let course = app.course("Astrophysics", 3.0, 10);

    let view = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect("selected");
    app.services
        .enrollment
        .cancel(view.id, student)
        .await
        .expect("withdrawn");

    flaky.error_increments.store(true, Ordering::SeqCst);
    let err = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect_err("timed out");
    assert_eq!(err.kind, ErrorKind::RemoteUpdateFailed);

    let record = app
        .store
        .find_by_id(&view.id)
        .await
        .expect("read")
        .expect("record kept");
    assert_eq!(record.status, EnrollmentStatus::Withdrawn);
    assert_eq!(app.courses.seat_count(&course), Some(0));
}
