//! Enrollment withdrawal command.

use clap::Args;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_core::types::id::{EnrollmentId, StudentId};

use crate::output::{self, OutputFormat};

/// Arguments for the cancel command
#[derive(Debug, Args)]
pub struct CancelArgs {
    /// Enrollment to withdraw
    pub enrollment: EnrollmentId,
    /// Student who owns the enrollment
    #[arg(long)]
    pub student: StudentId,
}

/// Execute the cancel command
pub async fn execute(
    args: &CancelArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let record = services
        .enrollment
        .cancel(args.enrollment, args.student)
        .await?;

    match format {
        OutputFormat::Json => output::print_item(&record, format),
        OutputFormat::Table => {
            output::print_success(&format!("Enrollment {} withdrawn", record.id));
        }
    }
    Ok(())
}
