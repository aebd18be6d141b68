//! Unified application error types for EnrollHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Admission outcomes that the caller
//! must be able to tell apart each get their own [`ErrorKind`].

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The caller does not own the resource it tried to act on.
    Authorization,
    /// Input validation failed.
    Validation,
    /// The student already holds a Selected enrollment for the course.
    AlreadyEnrolled,
    /// The student directory has no record of the student.
    StudentNotFound,
    /// The course directory has no record of the course.
    CourseNotFound,
    /// The course has no free seat.
    CapacityExceeded,
    /// The course schedule overlaps one of the student's current courses.
    ScheduleConflict,
    /// Adding the course would push the student over the credit ceiling.
    CreditLimitExceeded,
    /// The admission lease for the request is held by someone else.
    LockContention,
    /// The remote seat counter refused or failed the update.
    RemoteUpdateFailed,
    /// An internal error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A cache / shared keyed store error occurred.
    Cache,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external service error occurred.
    ExternalService,
}

impl ErrorKind {
    /// Whether a caller may resubmit the same request after backing off.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockContention)
    }

    /// Whether the error is an expected business rejection rather than a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::AlreadyEnrolled
                | Self::CapacityExceeded
                | Self::ScheduleConflict
                | Self::CreditLimitExceeded
                | Self::Validation
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::AlreadyEnrolled => write!(f, "ALREADY_ENROLLED"),
            Self::StudentNotFound => write!(f, "STUDENT_NOT_FOUND"),
            Self::CourseNotFound => write!(f, "COURSE_NOT_FOUND"),
            Self::CapacityExceeded => write!(f, "CAPACITY_EXCEEDED"),
            Self::ScheduleConflict => write!(f, "SCHEDULE_CONFLICT"),
            Self::CreditLimitExceeded => write!(f, "CREDIT_LIMIT_EXCEEDED"),
            Self::LockContention => write!(f, "LOCK_CONTENTION"),
            Self::RemoteUpdateFailed => write!(f, "REMOTE_UPDATE_FAILED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The unified application error used throughout EnrollHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an already-enrolled error.
    pub fn already_enrolled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyEnrolled, message)
    }

    /// Create a student-not-found error.
    pub fn student_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StudentNotFound, message)
    }

    /// Create a course-not-found error.
    pub fn course_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CourseNotFound, message)
    }

    /// Create a capacity-exceeded error.
    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CapacityExceeded, message)
    }

    /// Create a schedule-conflict error.
    pub fn schedule_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ScheduleConflict, message)
    }

    /// Create a credit-limit error.
    pub fn credit_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CreditLimitExceeded, message)
    }

    /// Create a lock-contention error.
    pub fn lock_contention(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LockContention, message)
    }

    /// Create a remote-update-failed error.
    pub fn remote_update_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteUpdateFailed, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
