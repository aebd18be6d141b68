//! Course selection command.

use clap::Args;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_core::types::id::{CourseId, StudentId};

use crate::output::{self, OutputFormat};

/// Arguments for the select command
#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Student selecting the course
    #[arg(long)]
    pub student: StudentId,
    /// Course to select
    #[arg(long)]
    pub course: CourseId,
}

/// Execute the select command
pub async fn execute(
    args: &SelectArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let view = services
        .admission
        .select_course(args.student, args.course)
        .await?;

    match format {
        OutputFormat::Json => output::print_item(&view, format),
        OutputFormat::Table => {
            output::print_success(&format!(
                "{} selected {}",
                view.student_name, view.course_name
            ));
            output::print_kv("Enrollment", &view.id.to_string());
            output::print_kv(
                "Selected at",
                &view.enrollment_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            );
            if let Some(teacher) = &view.teacher_name {
                output::print_kv("Teacher", teacher);
            }
        }
    }
    Ok(())
}
