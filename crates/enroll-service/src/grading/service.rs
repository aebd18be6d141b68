//! Score recording for selected enrollments.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use enroll_core::error::{AppError, ErrorKind};
use enroll_core::result::AppResult;
use enroll_core::types::id::EnrollmentId;
use enroll_database::store::EnrollmentStore;
use enroll_entity::enrollment::Enrollment;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 100.0;

/// One item of a batch score update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUpdate {
    /// Target enrollment.
    pub enrollment_id: EnrollmentId,
    /// New score; `None` clears it.
    pub score: Option<f64>,
}

/// A batch item that was not applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Target enrollment.
    pub enrollment_id: EnrollmentId,
    /// Why it failed.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// Outcome of a batch score update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Enrollments whose score was written.
    pub succeeded: Vec<EnrollmentId>,
    /// Items that failed, with their reasons.
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every item was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes scores onto Selected enrollments.
#[derive(Clone)]
pub struct GradingService {
    store: Arc<dyn EnrollmentStore>,
}

impl GradingService {
    /// Creates a new grading service.
    pub fn new(store: Arc<dyn EnrollmentStore>) -> Self {
        Self { store }
    }

    /// Set or clear the score of one enrollment.
    pub async fn update_score(
        &self,
        enrollment_id: EnrollmentId,
        score: Option<f64>,
    ) -> AppResult<Enrollment> {
        if let Some(value) = score {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(AppError::validation(format!(
                    "Score {value} is outside {MIN_SCORE}..={MAX_SCORE}"
                )));
            }
        }

        let mut record = self
            .store
            .find_by_id(&enrollment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Enrollment {enrollment_id} not found")))?;

        if !record.is_selected() {
            return Err(AppError::validation(format!(
                "Enrollment {enrollment_id} is {}, only selected enrollments can be scored",
                record.status
            )));
        }

        record.score = score;
        record.updated_at = Utc::now();
        self.store.update_by_id(&record).await?;

        info!(enrollment_id = %enrollment_id, score = ?score, "Score updated");
        Ok(record)
    }

    /// Apply each update independently; one failure never stops the rest.
    pub async fn batch_update_score(&self, items: Vec<ScoreUpdate>) -> BatchReport {
        let mut report = BatchReport::default();
        for item in items {
            match self.update_score(item.enrollment_id, item.score).await {
                Ok(_) => report.succeeded.push(item.enrollment_id),
                Err(e) => {
                    warn!(enrollment_id = %item.enrollment_id, error = %e, "Batch score item failed");
                    report.failed.push(BatchFailure {
                        enrollment_id: item.enrollment_id,
                        kind: e.kind,
                        message: e.message,
                    });
                }
            }
        }
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Batch score update finished"
        );
        report
    }
}
