//! Enrollment listing command.

use clap::Args;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_core::types::id::{CourseId, StudentId};
use enroll_core::types::pagination::PageRequest;
use enroll_database::store::EnrollmentFilter;

use crate::output::{self, EnrollmentRow, OutputFormat};

/// Arguments for the enrollments command
#[derive(Debug, Args)]
pub struct EnrollmentsArgs {
    /// Only this student's enrollments
    #[arg(long)]
    pub student: Option<StudentId>,
    /// Only enrollments in this course
    #[arg(long)]
    pub course: Option<CourseId>,
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,
    /// Page size
    #[arg(long, default_value = "10")]
    pub size: u64,
}

/// Execute the enrollments command
pub async fn execute(
    args: &EnrollmentsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let filter = EnrollmentFilter {
        student_id: args.student,
        course_id: args.course,
    };
    let page = services
        .enrollment
        .list_enrollments(filter, PageRequest::new(args.page, args.size))
        .await?;

    output::print_page::<_, EnrollmentRow>(&page, format);
    Ok(())
}
