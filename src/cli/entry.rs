//! Entry CLI commands
//!
//! Implements CLI commands for recording and inspecting daily entries.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_entry_details, format_entry_list};
use crate::error::TillResult;
use crate::services::{EntryAmounts, EntryService, RecordOutcome};
use crate::storage::Storage;

use super::{parse_date_arg, parse_month_arg};

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record the amounts for a day, replacing any previous entry
    Set {
        /// Day (YYYY-MM-DD)
        date: String,

        /// Cash received (e.g., "120.50" or "120,50")
        #[arg(long, allow_hyphen_values = true)]
        cash: Option<String>,

        /// Card payments received
        #[arg(long, allow_hyphen_values = true)]
        card: Option<String>,

        /// Cheque payments received
        #[arg(long, allow_hyphen_values = true)]
        cheque: Option<String>,

        /// Cash paid out of the drawer, usually negative
        #[arg(long, allow_hyphen_values = true)]
        expense: Option<String>,

        /// Note for the day
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show the entry for a day
    Show {
        /// Day (YYYY-MM-DD)
        date: String,
    },

    /// Delete the entry for a day
    #[command(alias = "rm")]
    Delete {
        /// Day (YYYY-MM-DD)
        date: String,
    },

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only entries of this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> TillResult<()> {
    let service = EntryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Set {
            date,
            cash,
            card,
            cheque,
            expense,
            note,
        } => {
            let date = parse_date_arg(&date)?;
            let amounts = EntryAmounts::parse_lenient(
                cash.as_deref(),
                card.as_deref(),
                cheque.as_deref(),
                expense.as_deref(),
            );

            let (entry, outcome) = service.record(date, amounts, note)?;
            let verb = match outcome {
                RecordOutcome::Created => "Recorded",
                RecordOutcome::Updated => "Updated",
            };
            println!(
                "{} {}: revenue {}, day total {}",
                verb,
                entry.date.format(&settings.date_format),
                entry.revenue().format_with_symbol(symbol),
                entry.day_total().format_with_symbol(symbol)
            );
        }

        EntryCommands::Show { date } => {
            let entry = service.get(parse_date_arg(&date)?)?;
            print!(
                "{}",
                format_entry_details(&entry, symbol, &settings.date_format)
            );
        }

        EntryCommands::Delete { date } => {
            let entry = service.delete(parse_date_arg(&date)?)?;
            println!("Deleted entry for {}", entry.date.format(&settings.date_format));
        }

        EntryCommands::List { month } => {
            let entries = match month {
                Some(m) => service.list_month(parse_month_arg(&m)?)?,
                None => service.list_all()?,
            };
            println!("{}", format_entry_list(&entries, &settings.date_format));
        }
    }

    Ok(())
}
