//! Enrollment-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::id::{CourseId, EnrollmentId, StudentId, TeacherId};

/// Wrapper for an enrollment event with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Events related to enrollment transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventPayload {
    /// A student was admitted into a course.
    SelectionSucceeded {
        /// The enrollment record.
        enrollment_id: EnrollmentId,
        /// The admitted student.
        student_id: StudentId,
        /// Student display name.
        student_name: Option<String>,
        /// The course.
        course_id: CourseId,
        /// Course display name.
        course_name: String,
        /// The course's teacher, who receives the notice.
        teacher_id: Option<TeacherId>,
    },
    /// A student withdrew from a course.
    SelectionWithdrawn {
        /// The enrollment record.
        enrollment_id: EnrollmentId,
        /// The student.
        student_id: StudentId,
        /// The course.
        course_id: CourseId,
    },
}

impl EnrollmentEvent {
    /// Create a new event stamped with the current time.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Short name of the event type, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self.payload {
            EventPayload::SelectionSucceeded { .. } => "selection_succeeded",
            EventPayload::SelectionWithdrawn { .. } => "selection_withdrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = EnrollmentEvent::new(EventPayload::SelectionWithdrawn {
            enrollment_id: EnrollmentId::new(),
            student_id: StudentId::new(),
            course_id: CourseId::new(),
        });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["payload"]["type"], "SelectionWithdrawn");
        assert_eq!(event.kind(), "selection_withdrawn");
    }
}
