//! Batch score update command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_service::ScoreUpdate;

use crate::output::{self, OutputFormat};

/// Arguments for the score-batch command
#[derive(Debug, Args)]
pub struct ScoreBatchArgs {
    /// JSON file holding `[{"enrollment_id": ..., "score": ...}]`
    pub file: String,
}

/// Failed batch item display row
#[derive(Debug, Serialize, Tabled)]
struct FailureRow {
    /// Enrollment ID
    enrollment: String,
    /// Error kind
    kind: String,
    /// Message
    message: String,
}

/// Execute the score-batch command
pub async fn execute(
    args: &ScoreBatchArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.file).await?;
    let items: Vec<ScoreUpdate> = serde_json::from_str(&raw)?;

    let services = super::build_services(config).await?;
    let report = services.grading.batch_update_score(items).await;

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_success(&format!("{} scores recorded", report.succeeded.len()));
            if !report.is_complete() {
                output::print_warning(&format!("{} items failed", report.failed.len()));
                let rows: Vec<FailureRow> = report
                    .failed
                    .iter()
                    .map(|f| FailureRow {
                        enrollment: f.enrollment_id.to_string(),
                        kind: f.kind.to_string(),
                        message: f.message.clone(),
                    })
                    .collect();
                output::print_list(&rows, format);
            }
        }
    }
    Ok(())
}
