//! CLI commands for reports
//!
//! Provides commands for the monthly sheet and its statistics.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_daily_chart, format_monthly_report, format_statistics};
use crate::error::TillResult;
use crate::services::EntryService;
use crate::storage::Storage;

use super::reference_date;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the month sheet with weekly rollups and statistics
    #[command(alias = "sheet")]
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "date")]
        month: Option<String>,

        /// Any day of the month to show (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Append a bar chart of daily revenue
        #[arg(long)]
        chart: bool,
    },

    /// Show only the statistics for a month
    Stats {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "date")]
        month: Option<String>,

        /// Any day of the month to show (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TillResult<()> {
    let service = EntryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Month { month, date, chart } => {
            let reference = reference_date(month.as_deref(), date.as_deref())?;
            let report = service.monthly_report(reference, settings.week_end_day)?;

            println!("{}", format_monthly_report(&report, symbol));
            if chart {
                println!("{}", format_daily_chart(&report));
            }
        }

        ReportCommands::Stats { month, date } => {
            let reference = reference_date(month.as_deref(), date.as_deref())?;
            let report = service.monthly_report(reference, settings.week_end_day)?;

            println!("{}", format_statistics(&report, symbol));
        }
    }

    Ok(())
}
