//! Single score update command.

use clap::Args;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_core::types::id::EnrollmentId;

use crate::output::{self, OutputFormat};

/// Arguments for the score command
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Enrollment to grade
    pub enrollment: EnrollmentId,
    /// Score between 0 and 100
    #[arg(required_unless_present = "clear", conflicts_with = "clear")]
    pub value: Option<f64>,
    /// Clear the score instead of setting one
    #[arg(long)]
    pub clear: bool,
}

/// Execute the score command
pub async fn execute(
    args: &ScoreArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let score = if args.clear { None } else { args.value };
    let record = services.grading.update_score(args.enrollment, score).await?;

    match format {
        OutputFormat::Json => output::print_item(&record, format),
        OutputFormat::Table => match record.score {
            Some(value) => output::print_success(&format!("Score {value:.1} recorded on {}", record.id)),
            None => output::print_success(&format!("Score cleared on {}", record.id)),
        },
    }
    Ok(())
}
