//! Candidate course listing command.

use clap::Args;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_core::types::id::StudentId;
use enroll_core::types::pagination::PageRequest;

use crate::output::{self, CourseRow, OutputFormat};

/// Arguments for the available command
#[derive(Debug, Args)]
pub struct AvailableArgs {
    /// Student to filter for; without it only full courses are hidden
    #[arg(long)]
    pub student: Option<StudentId>,
    /// Free-text filter on course name or code
    #[arg(short, long)]
    pub keyword: Option<String>,
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,
    /// Page size
    #[arg(long, default_value = "10")]
    pub size: u64,
}

/// Execute the available command
pub async fn execute(
    args: &AvailableArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let page = services
        .catalog
        .available_courses(
            args.student,
            PageRequest::new(args.page, args.size),
            args.keyword.clone(),
        )
        .await?;

    output::print_page::<_, CourseRow>(&page, format);
    Ok(())
}
