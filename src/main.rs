//! EnrollHub operator CLI.
//!
//! Loads configuration, builds the configured backends and runs one
//! admission, withdrawal, listing or grading operation against them.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use enroll_core::config::AppConfig;
use enroll_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

/// Exit code for an expected business rejection.
const EXIT_REJECTED: i32 = 2;
/// Exit code for a transient failure the caller may retry.
const EXIT_RETRY: i32 = 75;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        output::print_error(&e.to_string());
        std::process::exit(exit_code(&e));
    }
}

/// Initialize tracing on stderr so command output stays machine-readable.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter_directive()));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn exit_code(err: &AppError) -> i32 {
    if err.kind.is_retryable() {
        EXIT_RETRY
    } else if err.kind.is_rejection() {
        EXIT_REJECTED
    } else {
        1
    }
}
