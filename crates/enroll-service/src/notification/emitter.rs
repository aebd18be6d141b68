//! Notification emitter implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use enroll_core::config::NotificationConfig;
use enroll_core::error::AppError;
use enroll_core::events::{EnrollmentEvent, EventPayload};
use enroll_core::result::AppResult;
use enroll_core::traits::notification::NotificationEmitter;

/// Fans events out to in-process subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    tx: broadcast::Sender<EnrollmentEvent>,
}

impl BroadcastEmitter {
    /// Create an emitter whose channel buffers `buffer_size` events.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size.max(1));
        Self { tx }
    }

    /// Subscribe to all subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<EnrollmentEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl NotificationEmitter for BroadcastEmitter {
    async fn publish(&self, event: &EnrollmentEvent) -> AppResult<()> {
        match self.tx.send(event.clone()) {
            Ok(receivers) => {
                debug!(event = event.kind(), receivers, "Event broadcast");
            }
            Err(_) => {
                debug!(event = event.kind(), "Event dropped, no subscribers");
            }
        }
        Ok(())
    }
}

/// Writes events to the structured log only.
#[derive(Debug, Clone, Default)]
pub struct LogEmitter;

#[async_trait]
impl NotificationEmitter for LogEmitter {
    async fn publish(&self, event: &EnrollmentEvent) -> AppResult<()> {
        match &event.payload {
            EventPayload::SelectionSucceeded {
                enrollment_id,
                student_id,
                student_name,
                course_id,
                course_name,
                teacher_id,
            } => info!(
                event_id = %event.id,
                enrollment_id = %enrollment_id,
                student_id = %student_id,
                student_name = student_name.as_deref().unwrap_or("-"),
                course_id = %course_id,
                course_name = %course_name,
                teacher_id = ?teacher_id,
                "Selection succeeded"
            ),
            EventPayload::SelectionWithdrawn {
                enrollment_id,
                student_id,
                course_id,
            } => info!(
                event_id = %event.id,
                enrollment_id = %enrollment_id,
                student_id = %student_id,
                course_id = %course_id,
                "Selection withdrawn"
            ),
        }
        Ok(())
    }
}

/// Build the emitter named by `config.provider`.
pub fn build_emitter(config: &NotificationConfig) -> AppResult<Arc<dyn NotificationEmitter>> {
    match config.provider.as_str() {
        "log" => Ok(Arc::new(LogEmitter)),
        "broadcast" => Ok(Arc::new(BroadcastEmitter::new(config.buffer_size))),
        other => Err(AppError::configuration(format!(
            "Unknown notification provider: '{other}'. Supported: log, broadcast"
        ))),
    }
}
