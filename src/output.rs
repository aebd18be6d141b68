//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use enroll_core::types::directory::CourseSnapshot;
use enroll_core::types::pagination::PageResponse;
use enroll_entity::enrollment::EnrollmentView;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Enrollment display row
#[derive(Debug, Serialize, Tabled)]
pub struct EnrollmentRow {
    /// Enrollment ID
    pub id: String,
    /// Student
    pub student: String,
    /// Course
    pub course: String,
    /// Status
    pub status: String,
    /// Selected at
    pub selected_at: String,
    /// Score
    pub score: String,
}

impl From<&EnrollmentView> for EnrollmentRow {
    fn from(v: &EnrollmentView) -> Self {
        Self {
            id: v.id.to_string(),
            student: v.student_name.clone(),
            course: v.course_name.clone(),
            status: v.status.to_string(),
            selected_at: v.enrollment_time.format("%Y-%m-%d %H:%M").to_string(),
            score: v.score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".into()),
        }
    }
}

/// Course display row
#[derive(Debug, Serialize, Tabled)]
pub struct CourseRow {
    /// Course ID
    pub id: String,
    /// Name
    pub name: String,
    /// Teacher
    pub teacher: String,
    /// Credit
    pub credit: String,
    /// Seats taken / capacity
    pub seats: String,
    /// Schedule
    pub schedule: String,
}

impl From<&CourseSnapshot> for CourseRow {
    fn from(c: &CourseSnapshot) -> Self {
        let dash = || "-".to_string();
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            teacher: c.teacher_name.clone().unwrap_or_else(dash),
            credit: c.credit.map(|v| format!("{v:.1}")).unwrap_or_else(dash),
            seats: match (c.seat_count, c.capacity) {
                (Some(taken), Some(cap)) => format!("{taken}/{cap}"),
                (Some(taken), None) => format!("{taken}/∞"),
                _ => dash(),
            },
            schedule: c
                .schedule()
                .map(|w| format!("{} - {}", w.start.format("%a %H:%M"), w.end.format("%H:%M")))
                .unwrap_or_else(dash),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print one page of items, with a page footer in table mode
pub fn print_page<T, R>(page: &PageResponse<T>, format: OutputFormat)
where
    T: Serialize + std::fmt::Debug,
    R: Serialize + Tabled + for<'a> From<&'a T>,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = page.items.iter().map(R::from).collect();
            print_list(&rows, format);
            println!(
                "Page {}/{} ({} total)",
                page.page, page.total_pages, page.total_items
            );
        }
        OutputFormat::Json => print_item(page, format),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{item:#?}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
