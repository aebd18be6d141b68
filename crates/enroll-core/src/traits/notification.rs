//! Outbound enrollment event transport.

use async_trait::async_trait;

use crate::events::EnrollmentEvent;
use crate::result::AppResult;

/// Fire-and-forget publisher of enrollment events.
///
/// Callers never let a publish failure change the outcome of the
/// operation that produced the event.
#[async_trait]
pub trait NotificationEmitter: Send + Sync + 'static {
    /// Publish one event.
    async fn publish(&self, event: &EnrollmentEvent) -> AppResult<()>;
}
