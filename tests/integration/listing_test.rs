//! Integration tests for the candidate course listing.

mod helpers;

use std::sync::atomic::Ordering;

use enroll_core::config::AdmissionConfig;
use enroll_core::types::pagination::PageRequest;

use helpers::TestApp;

fn small_batches() -> AdmissionConfig {
    AdmissionConfig {
        listing_batch_size: 2,
        ..AdmissionConfig::default()
    }
}

#[tokio::test]
async fn test_listing_applies_admission_predicates() {
    let app = TestApp::with_config(small_batches());
    let student = app.student();

    let held = app.course_at("Archaeology", 3.0, 10, Some((9, 11)));
    let clashing = app.course_at("Biochemistry", 3.0, 10, Some((10, 12)));
    let adjacent = app.course_at("Cartography", 3.0, 10, Some((11, 13)));
    let full = app.course("Demography", 3.0, 1);
    let open = app.course("Economics", 3.0, 10);

    app.services
        .admission
        .select_course(student, held)
        .await
        .expect("held");
    app.services
        .admission
        .select_course(app.student(), full)
        .await
        .expect("fill");

    let page = app
        .services
        .catalog
        .available_courses(Some(student), PageRequest::new(1, 10), None)
        .await
        .expect("listing");
    let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![adjacent, open]);
    assert!(!ids.contains(&clashing));
    assert_eq!(page.total_items, 2);

    let anonymous = app
        .services
        .catalog
        .available_courses(None, PageRequest::new(1, 10), None)
        .await
        .expect("anonymous listing");
    assert_eq!(anonymous.total_items, 4);
}

#[tokio::test]
async fn test_listing_paginates_the_filtered_result() {
    let app = TestApp::with_config(small_batches());
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
        app.course(name, 2.0, 10);
    }
    let full = app.course("Foxtrot", 2.0, 1);
    app.services
        .admission
        .select_course(app.student(), full)
        .await
        .expect("fill");

    let second = app
        .services
        .catalog
        .available_courses(None, PageRequest::new(2, 2), None)
        .await
        .expect("page two");
    let names: Vec<_> = second.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Delta"]);
    assert_eq!(second.total_items, 5);
    assert_eq!(second.total_pages, 3);
    assert!(second.has_next);
}

#[tokio::test]
async fn test_keyword_narrows_the_catalogue() {
    let app = TestApp::new();
    app.course("Organic Chemistry", 3.0, 10);
    app.course("Inorganic Chemistry", 3.0, 10);
    app.course("Philosophy", 3.0, 10);

    let page = app
        .services
        .catalog
        .available_courses(None, PageRequest::new(1, 10), Some("chem".into()))
        .await
        .expect("listing");
    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|c| c.name.contains("Chemistry")));
}

#[tokio::test]
async fn test_failed_page_stops_the_pull() {
    let (app, flaky) = TestApp::flaky(small_batches());
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
        app.course(name, 2.0, 10);
    }
    flaky.fail_from_page.store(2, Ordering::SeqCst);

    let page = app
        .services
        .catalog
        .available_courses(None, PageRequest::new(1, 10), None)
        .await
        .expect("partial listing");
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);
    assert_eq!(flaky.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_short_page_ends_the_pull() {
    let (app, flaky) = TestApp::flaky(small_batches());
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
        app.course(name, 2.0, 10);
    }

    let page = app
        .services
        .catalog
        .available_courses(None, PageRequest::new(1, 10), None)
        .await
        .expect("listing");
    assert_eq!(page.total_items, 5);
    assert_eq!(flaky.list_calls.load(Ordering::SeqCst), 3);
}
