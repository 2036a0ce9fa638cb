//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod entry;
pub mod import;
pub mod report;

pub use audit::handle_audit_command;
pub use entry::{handle_entry_command, EntryCommands};
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{TillError, TillResult};
use crate::models::Month;

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date_arg(s: &str) -> TillResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        TillError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month argument
pub(crate) fn parse_month_arg(s: &str) -> TillResult<Month> {
    Month::parse(s).map_err(|e| {
        TillError::Validation(format!("Invalid month: {}. Use YYYY-MM (e.g., 2024-06)", e))
    })
}

/// Pick the reference date from `--month` or `--date`, defaulting to today
pub(crate) fn reference_date(month: Option<&str>, date: Option<&str>) -> TillResult<NaiveDate> {
    match (month, date) {
        (Some(m), _) => Ok(parse_month_arg(m)?.first_day()),
        (None, Some(d)) => parse_date_arg(d),
        (None, None) => Ok(chrono::Local::now().date_naive()),
    }
}
