//! Integration tests for the enrollment lifecycle: select, withdraw, reselect, grade.

mod helpers;

use std::time::Duration;

use enroll_core::error::ErrorKind;
use enroll_core::events::EventPayload;
use enroll_core::types::id::{EnrollmentId, StudentId};
use enroll_core::types::pagination::PageRequest;
use enroll_database::store::{EnrollmentFilter, EnrollmentStore};
use enroll_entity::enrollment::EnrollmentStatus;
use enroll_service::ScoreUpdate;

use helpers::TestApp;

#[tokio::test]
async fn test_reselect_reuses_the_withdrawn_record() {
    let app = TestApp::new();
    let student = app.student();
    let course = app.course("Calculus", 4.0, 10);

    let first = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect("first select");
    let withdrawn = app
        .services
        .enrollment
        .cancel(first.id, student)
        .await
        .expect("cancel");
    assert_eq!(withdrawn.status, EnrollmentStatus::Withdrawn);
    assert_eq!(app.courses.seat_count(&course), Some(0));

    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect("reselect");

    assert_eq!(second.id, first.id);
    assert_eq!(second.status, EnrollmentStatus::Selected);
    assert!(second.enrollment_time > first.enrollment_time);
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.courses.seat_count(&course), Some(1));
}

#[tokio::test]
async fn test_cancel_is_owner_only_and_idempotent() {
    let app = TestApp::new();
    let owner = app.student();
    let course = app.course("Statistics", 3.0, 10);
    let view = app
        .services
        .admission
        .select_course(owner, course)
        .await
        .expect("selected");

    let err = app
        .services
        .enrollment
        .cancel(view.id, StudentId::new())
        .await
        .expect_err("foreign");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .services
        .enrollment
        .cancel(EnrollmentId::new(), owner)
        .await
        .expect_err("unknown");
    assert_eq!(err.kind, ErrorKind::NotFound);

    app.services.enrollment.cancel(view.id, owner).await.expect("cancel");
    app.services.enrollment.cancel(view.id, owner).await.expect("cancel again");
    assert_eq!(app.courses.seat_count(&course), Some(0));
}

#[tokio::test]
async fn test_withdrawal_frees_a_seat_for_someone_else() {
    let app = TestApp::new();
    let course = app.course("Genetics", 3.0, 1);
    let first = app.student();
    let second = app.student();

    let view = app
        .services
        .admission
        .select_course(first, course)
        .await
        .expect("first");
    let err = app
        .services
        .admission
        .select_course(second, course)
        .await
        .expect_err("full");
    assert_eq!(err.kind, ErrorKind::CapacityExceeded);

    app.services.enrollment.cancel(view.id, first).await.expect("cancel");
    app.services
        .admission
        .select_course(second, course)
        .await
        .expect("seat freed");
    assert_eq!(app.courses.seat_count(&course), Some(1));
}

#[tokio::test]
async fn test_events_follow_the_lifecycle() {
    let app = TestApp::new();
    let mut events = app.emitter.subscribe();
    let student = app.student();
    let course = app.course("Ecology", 2.0, 10);

    let view = app
        .services
        .admission
        .select_course(student, course)
        .await
        .expect("selected");
    app.services.enrollment.cancel(view.id, student).await.expect("cancel");

    // Each event is published from its own task, so arrival order is free.
    let mut kinds = Vec::new();
    for _ in 0..2 {
        let event = events.recv().await.expect("event");
        match event.payload {
            EventPayload::SelectionSucceeded { enrollment_id, .. } => {
                assert_eq!(enrollment_id, view.id);
                kinds.push("selected");
            }
            EventPayload::SelectionWithdrawn { enrollment_id, .. } => {
                assert_eq!(enrollment_id, view.id);
                kinds.push("withdrawn");
            }
        }
    }
    kinds.sort_unstable();
    assert_eq!(kinds, vec!["selected", "withdrawn"]);
}

#[tokio::test]
async fn test_grading_only_touches_selected_records() {
    let app = TestApp::new();
    let student = app.student();
    let kept = app
        .services
        .admission
        .select_course(student, app.course("Anatomy", 3.0, 10))
        .await
        .expect("kept");
    let dropped = app
        .services
        .admission
        .select_course(student, app.course("Botany", 3.0, 10))
        .await
        .expect("dropped");
    app.services
        .enrollment
        .cancel(dropped.id, student)
        .await
        .expect("cancel");

    let graded = app
        .services
        .grading
        .update_score(kept.id, Some(91.5))
        .await
        .expect("graded");
    assert_eq!(graded.score, Some(91.5));

    let err = app
        .services
        .grading
        .update_score(kept.id, Some(100.5))
        .await
        .expect_err("out of range");
    assert_eq!(err.kind, ErrorKind::Validation);

    let report = app
        .services
        .grading
        .batch_update_score(vec![
            ScoreUpdate {
                enrollment_id: kept.id,
                score: None,
            },
            ScoreUpdate {
                enrollment_id: dropped.id,
                score: Some(70.0),
            },
            ScoreUpdate {
                enrollment_id: EnrollmentId::new(),
                score: Some(70.0),
            },
        ])
        .await;
    assert_eq!(report.succeeded, vec![kept.id]);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].kind, ErrorKind::Validation);
    assert_eq!(report.failed[1].kind, ErrorKind::NotFound);

    let cleared = app
        .store
        .find_by_id(&kept.id)
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(cleared.score, None);
}

#[tokio::test]
async fn test_enrollment_listing_is_newest_first() {
    let app = TestApp::new();
    let student = app.student();
    let mut ids = Vec::new();
    for name in ["Logic", "Rhetoric", "Grammar"] {
        let view = app
            .services
            .admission
            .select_course(student, app.course(name, 2.0, 10))
            .await
            .expect("selected");
        ids.push(view.id);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    app.services
        .admission
        .select_course(app.student(), app.course("Music", 2.0, 10))
        .await
        .expect("other student");

    let page = app
        .services
        .enrollment
        .list_enrollments(
            EnrollmentFilter {
                student_id: Some(student),
                course_id: None,
            },
            PageRequest::new(1, 2),
        )
        .await
        .expect("page");
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
    let listed: Vec<_> = page.items.iter().map(|v| v.id).collect();
    assert_eq!(listed, vec![ids[2], ids[1]]);
    assert_eq!(page.items[0].course_name, "Grammar");
}
