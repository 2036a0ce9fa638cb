//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries and reports for terminal
//! display.

pub mod entry;
pub mod report;

pub use entry::{format_entry_details, format_entry_list};
pub use report::{
    format_daily_chart, format_month_sheet, format_monthly_report, format_statistics,
};
