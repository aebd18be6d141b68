//! CLI command definitions and dispatch.

pub mod available;
pub mod cancel;
pub mod enrollments;
pub mod health;
pub mod migrate;
pub mod score;
pub mod score_batch;
pub mod select;

use clap::{Parser, Subcommand};

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;
use enroll_service::{Backends, Services};

use crate::output::OutputFormat;

/// Printed under `--help`.
const MEMORY_STATE_NOTE: &str = "With the default \"memory\" providers every invocation starts \
from empty state: cancel, score and enrollments cannot see a record made by an earlier \
select. Configure database.provider = \"postgres\" for persistent enrollments.";

/// EnrollHub course admission control
#[derive(Debug, Parser)]
#[command(name = "enrollhub", version, about, long_about = None, after_help = MEMORY_STATE_NOTE)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Select a course for a student
    Select(select::SelectArgs),
    /// Withdraw a student's enrollment
    Cancel(cancel::CancelArgs),
    /// List courses a student could still select
    Available(available::AvailableArgs),
    /// List enrollment records
    Enrollments(enrollments::EnrollmentsArgs),
    /// Set or clear one enrollment's score
    Score(score::ScoreArgs),
    /// Apply scores from a JSON file
    ScoreBatch(score_batch::ScoreBatchArgs),
    /// Probe the configured backends
    Health,
    /// Database migration management
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Select(args) => select::execute(args, config, self.format).await,
            Commands::Cancel(args) => cancel::execute(args, config, self.format).await,
            Commands::Available(args) => available::execute(args, config, self.format).await,
            Commands::Enrollments(args) => enrollments::execute(args, config, self.format).await,
            Commands::Score(args) => score::execute(args, config, self.format).await,
            Commands::ScoreBatch(args) => score_batch::execute(args, config, self.format).await,
            Commands::Health => health::execute(config, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, config).await,
        }
    }
}

/// Helper: build every backend and the service layer over them
pub async fn build_services(config: &AppConfig) -> Result<Services, AppError> {
    let backends = Backends::from_config(config).await?;
    Ok(Services::new(&backends, &config.admission))
}
