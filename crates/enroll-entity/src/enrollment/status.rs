//! Enrollment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// The student holds a seat in the course.
    Selected,
    /// The student withdrew. The record is kept for re-enrollment.
    Withdrawn,
}

impl EnrollmentStatus {
    /// Whether the record currently occupies a seat.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
