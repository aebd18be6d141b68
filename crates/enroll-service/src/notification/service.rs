//! Fire-and-forget event publication.

use std::sync::Arc;

use tracing::warn;

use enroll_core::events::EnrollmentEvent;
use enroll_core::traits::notification::NotificationEmitter;

/// Publishes events on detached tasks.
///
/// Publication never blocks the caller and its failures are logged and
/// dropped.
#[derive(Clone)]
pub struct NotificationService {
    emitter: Arc<dyn NotificationEmitter>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(emitter: Arc<dyn NotificationEmitter>) -> Self {
        Self { emitter }
    }

    /// Publish `event` in the background.
    pub fn emit(&self, event: EnrollmentEvent) {
        let emitter = self.emitter.clone();
        tokio::spawn(async move {
            if let Err(e) = emitter.publish(&event).await {
                warn!(event = event.kind(), error = %e, "Failed to publish enrollment event");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use enroll_core::error::AppError;
    use enroll_core::events::EventPayload;
    use enroll_core::result::AppResult;
    use enroll_core::types::id::{CourseId, EnrollmentId, StudentId};

    use super::*;
    use crate::notification::BroadcastEmitter;

    struct FailingEmitter;

    #[async_trait]
    impl NotificationEmitter for FailingEmitter {
        async fn publish(&self, _event: &EnrollmentEvent) -> AppResult<()> {
            Err(AppError::external_service("transport down"))
        }
    }

    fn withdrawn() -> EnrollmentEvent {
        EnrollmentEvent::new(EventPayload::SelectionWithdrawn {
            enrollment_id: EnrollmentId::new(),
            student_id: StudentId::new(),
            course_id: CourseId::new(),
        })
    }

    #[tokio::test]
    async fn test_emit_delivers_in_background() {
        let emitter = Arc::new(BroadcastEmitter::new(4));
        let mut rx = emitter.subscribe();
        let service = NotificationService::new(emitter);
        let event = withdrawn();
        service.emit(event.clone());
        let received = rx.recv().await.expect("delivered");
        assert_eq!(received.id, event.id);
    }

    #[tokio::test]
    async fn test_emit_swallows_failures() {
        let service = NotificationService::new(Arc::new(FailingEmitter));
        service.emit(withdrawn());
        tokio::task::yield_now().await;
    }
}
