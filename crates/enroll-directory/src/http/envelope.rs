//! Wire payloads of the course and student services.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use enroll_core::error::AppError;
use enroll_core::result::AppResult;
use enroll_core::traits::directory::SeatUpdate;
use enroll_core::types::directory::{CourseSnapshot, StudentSnapshot};
use enroll_core::types::id::{CourseId, StudentId, TeacherId};

/// Success code of the response envelope.
pub const CODE_OK: i64 = 200;
/// Code the course service answers with when a course is at capacity.
pub const CODE_FULL: i64 = 400;
/// Code for a missing resource.
pub const CODE_NOT_FOUND: i64 = 404;

/// `{code, message, data}` envelope wrapping every response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Status code; 200 means success.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload; a not-found code or null data yields `None`.
    pub fn into_data(self) -> AppResult<Option<T>> {
        match self.code {
            CODE_OK => Ok(self.data),
            CODE_NOT_FOUND => Ok(None),
            code => Err(AppError::external_service(format!(
                "Directory answered {code}: {}",
                self.message.unwrap_or_default()
            ))),
        }
    }

    /// Interpret the envelope of a seat counter update.
    pub fn seat_update(&self) -> SeatUpdate {
        match self.code {
            CODE_OK => SeatUpdate::Applied,
            CODE_FULL => SeatUpdate::Full,
            _ => SeatUpdate::Rejected,
        }
    }
}

/// One page of the course catalogue.
#[derive(Debug, Deserialize)]
pub struct PagePayload<T> {
    /// Records on the page.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    /// Total number of matching records.
    #[serde(default)]
    pub total: u64,
}

/// Course record as served by the course service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub course_id: CourseId,
    pub course_name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub credit: Option<f64>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub total_capacity: Option<u32>,
    #[serde(default)]
    pub selected_count: Option<u32>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl From<CoursePayload> for CourseSnapshot {
    fn from(p: CoursePayload) -> Self {
        let schedule_start = schedule_bound(&p.course_id, "startTime", p.start_time.as_deref());
        let schedule_end = schedule_bound(&p.course_id, "endTime", p.end_time.as_deref());
        Self {
            id: p.course_id,
            name: p.course_name,
            code: p.course_code,
            teacher_id: p.teacher_id,
            teacher_name: p.teacher_name,
            department: p.department,
            credit: p.credit,
            capacity: p.total_capacity,
            seat_count: p.selected_count,
            schedule_start,
            schedule_end,
            cover_image: p.cover_image,
        }
    }
}

/// Student record as served by the student service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(alias = "studentId")]
    pub id: StudentId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "studentNo")]
    pub username: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
}

impl From<StudentPayload> for StudentSnapshot {
    fn from(p: StudentPayload) -> Self {
        Self {
            id: p.id,
            name: p.name,
            student_no: p.username,
            major: p.major,
        }
    }
}

/// Parse one schedule bound; an unreadable value is logged and dropped.
///
/// A dropped bound leaves the course unscheduled, which disables the
/// conflict check for it.
fn schedule_bound(course_id: &CourseId, field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    let parsed = parse_time(raw);
    if parsed.is_none() {
        warn!(
            course_id = %course_id,
            field,
            raw,
            "Unparseable course schedule bound, course treated as unscheduled"
        );
    }
    parsed
}

/// Parse a timestamp that is either RFC 3339 or a zone-less local time taken as UTC.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
