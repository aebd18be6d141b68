//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use enroll_cache::memory::MemoryLeaseStore;
use enroll_core::config::AdmissionConfig;
use enroll_core::config::cache::MemoryCacheConfig;
use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, SeatUpdate};
use enroll_core::types::directory::{CourseQuery, CourseSnapshot, StudentSnapshot};
use enroll_core::types::id::{CourseId, StudentId};
use enroll_database::MemoryEnrollmentStore;
use enroll_directory::{Directories, MemoryCourseDirectory, MemoryStudentDirectory};
use enroll_service::{Backends, BroadcastEmitter, Services};

/// Test application wired on in-memory backends
pub struct TestApp {
    /// Enrollment records
    pub store: MemoryEnrollmentStore,
    /// Course directory behind any wrapper
    pub courses: MemoryCourseDirectory,
    /// Student directory
    pub students: MemoryStudentDirectory,
    /// Lease store
    pub leases: Arc<MemoryLeaseStore>,
    /// Event emitter
    pub emitter: Arc<BroadcastEmitter>,
    /// Service layer
    pub services: Services,
}

impl TestApp {
    /// Create an app with default admission settings
    pub fn new() -> Self {
        Self::build(AdmissionConfig::default(), |courses| courses)
    }

    /// Create an app with custom admission settings
    pub fn with_config(config: AdmissionConfig) -> Self {
        Self::build(config, |courses| courses)
    }

    /// Create an app whose services see the course directory through `wrap`
    pub fn build(
        config: AdmissionConfig,
        wrap: impl FnOnce(Arc<dyn CourseDirectory>) -> Arc<dyn CourseDirectory>,
    ) -> Self {
        let store = MemoryEnrollmentStore::new();
        let courses = MemoryCourseDirectory::new();
        let students = MemoryStudentDirectory::new();
        let leases = Arc::new(MemoryLeaseStore::new(&MemoryCacheConfig::default()));
        let emitter = Arc::new(BroadcastEmitter::new(256));

        let backends = Backends {
            store: Arc::new(store.clone()),
            leases: leases.clone(),
            directories: Directories {
                courses: wrap(Arc::new(courses.clone())),
                students: Arc::new(students.clone()),
            },
            emitter: emitter.clone(),
        };
        let services = Services::new(&backends, &config);

        Self {
            store,
            courses,
            students,
            leases,
            emitter,
            services,
        }
    }

    /// Create an app whose course directory can be made to fail
    pub fn flaky(config: AdmissionConfig) -> (Self, Arc<FlakyCourses>) {
        let mut handle = None;
        let app = Self::build(config, |inner| {
            let wrapper = Arc::new(FlakyCourses::new(inner));
            handle = Some(wrapper.clone());
            let erased: Arc<dyn CourseDirectory> = wrapper;
            erased
        });
        let handle = handle.expect("wrapper installed");
        (app, handle)
    }

    /// Register a student and return its id
    pub fn student(&self) -> StudentId {
        let id = StudentId::new();
        self.students.upsert(StudentSnapshot {
            id,
            name: Some(format!("Student {id}")),
            student_no: Some(format!("S-{}", &id.to_string()[..8])),
            major: Some("Physics".into()),
        });
        id
    }

    /// Register an unscheduled course
    pub fn course(&self, name: &str, credit: f64, capacity: u32) -> CourseId {
        self.course_at(name, credit, capacity, None)
    }

    /// Register a course scheduled between two hours of the same day
    pub fn course_at(
        &self,
        name: &str,
        credit: f64,
        capacity: u32,
        hours: Option<(u32, u32)>,
    ) -> CourseId {
        let id = CourseId::new();
        self.courses.upsert(CourseSnapshot {
            id,
            name: name.to_string(),
            code: Some(name.to_uppercase().replace(' ', "")),
            teacher_id: None,
            teacher_name: Some("Dr. Reyes".into()),
            department: Some("Science".into()),
            credit: Some(credit),
            capacity: Some(capacity),
            seat_count: Some(0),
            schedule_start: hours.map(|(start, _)| at(start)),
            schedule_end: hours.map(|(_, end)| at(end)),
            cover_image: None,
        });
        id
    }
}

/// A fixed instant on the test day
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0)
        .single()
        .expect("valid time")
}

/// Course directory whose seat increments can be made to fail
pub struct FlakyCourses {
    inner: Arc<dyn CourseDirectory>,
    /// Refuse increments with `SeatUpdate::Rejected`
    pub reject_increments: AtomicBool,
    /// Fail increments with a transport error
    pub error_increments: AtomicBool,
    /// Fail `list_open` from this page on (0 disables)
    pub fail_from_page: AtomicUsize,
    /// Number of `list_open` calls seen
    pub list_calls: AtomicUsize,
}

impl FlakyCourses {
    /// Wrap a directory; every failure switch starts off
    pub fn new(inner: Arc<dyn CourseDirectory>) -> Self {
        Self {
            inner,
            reject_increments: AtomicBool::new(false),
            error_increments: AtomicBool::new(false),
            fail_from_page: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CourseDirectory for FlakyCourses {
    async fn get(&self, course_id: &CourseId) -> AppResult<Option<CourseSnapshot>> {
        self.inner.get(course_id).await
    }

    async fn increment_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        if self.error_increments.load(Ordering::SeqCst) {
            return Err(AppError::external_service("course service timed out"));
        }
        if self.reject_increments.load(Ordering::SeqCst) {
            return Ok(SeatUpdate::Rejected);
        }
        self.inner.increment_seat(course_id).await
    }

    async fn decrement_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        self.inner.decrement_seat(course_id).await
    }

    async fn list_open(&self, query: &CourseQuery) -> AppResult<Vec<CourseSnapshot>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let fail_from = self.fail_from_page.load(Ordering::SeqCst) as u64;
        if fail_from > 0 && query.page >= fail_from {
            return Err(AppError::external_service("course page unavailable"));
        }
        self.inner.list_open(query).await
    }
}
