//! Backend health probe command.

use serde::Serialize;
use tabled::Tabled;

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_service::Backends;

use crate::output::{self, OutputFormat};

/// Backend health display row
#[derive(Debug, Serialize, Tabled)]
struct HealthRow {
    /// Backend
    component: String,
    /// Reachable
    healthy: bool,
    /// Error detail
    detail: String,
}

/// Execute the health command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let backends = Backends::from_config(config).await?;
    let report = backends.health_check().await;

    let rows: Vec<HealthRow> = report
        .iter()
        .map(|c| HealthRow {
            component: c.name.to_string(),
            healthy: c.healthy,
            detail: c.detail.clone().unwrap_or_default(),
        })
        .collect();
    output::print_list(&rows, format);

    if report.iter().all(|c| c.healthy) {
        Ok(())
    } else {
        Err(AppError::external_service("One or more backends are unhealthy"))
    }
}
