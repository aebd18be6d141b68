//! In-memory service graph for unit tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use enroll_cache::memory::MemoryLeaseStore;
use enroll_core::config::AdmissionConfig;
use enroll_core::config::cache::MemoryCacheConfig;
use enroll_core::types::directory::{CourseSnapshot, StudentSnapshot};
use enroll_core::types::id::{CourseId, StudentId};
use enroll_database::MemoryEnrollmentStore;
use enroll_directory::{Directories, MemoryCourseDirectory, MemoryStudentDirectory};

use crate::notification::BroadcastEmitter;
use crate::registry::{Backends, Services};

pub(crate) struct Fixture {
    pub store: MemoryEnrollmentStore,
    pub courses: MemoryCourseDirectory,
    pub students: MemoryStudentDirectory,
    pub leases: Arc<MemoryLeaseStore>,
    pub emitter: Arc<BroadcastEmitter>,
    pub services: Services,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(AdmissionConfig::default())
    }

    pub fn with_config(config: AdmissionConfig) -> Self {
        let store = MemoryEnrollmentStore::new();
        let courses = MemoryCourseDirectory::new();
        let students = MemoryStudentDirectory::new();
        let leases = Arc::new(MemoryLeaseStore::new(&MemoryCacheConfig::default()));
        let emitter = Arc::new(BroadcastEmitter::new(64));
        let backends = Backends {
            store: Arc::new(store.clone()),
            leases: leases.clone(),
            directories: Directories {
                courses: Arc::new(courses.clone()),
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

    pub fn student(&self) -> StudentId {
        let id = StudentId::new();
        self.students.upsert(StudentSnapshot {
            id,
            name: Some(format!("student-{id}")),
            student_no: None,
            major: Some("Computer Science".into()),
        });
        id
    }

    pub fn course(&self, credit: f64, capacity: u32) -> CourseId {
        self.course_at(credit, capacity, None)
    }

    pub fn course_at(&self, credit: f64, capacity: u32, hours: Option<(u32, u32)>) -> CourseId {
        let id = CourseId::new();
        self.courses.upsert(CourseSnapshot {
            id,
            name: format!("course-{id}"),
            code: None,
            teacher_id: None,
            teacher_name: None,
            department: None,
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

pub(crate) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0)
        .single()
        .expect("valid time")
}
