//! Entry display formatting
//!
//! Formats entries for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Entry, Money};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Cash")]
    cash: Money,
    #[tabled(rename = "Card")]
    card: Money,
    #[tabled(rename = "Cheque")]
    cheque: Money,
    #[tabled(rename = "Expense")]
    expense: Money,
    #[tabled(rename = "Revenue")]
    revenue: Money,
    #[tabled(rename = "Note")]
    note: String,
}

/// Format a list of entries as a table with a total row
pub fn format_entry_list(entries: &[Entry], date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let mut rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            date: e.date.format(date_format).to_string(),
            cash: e.cash,
            card: e.card,
            cheque: e.cheque,
            expense: e.expense,
            revenue: e.revenue(),
            note: e.note.clone(),
        })
        .collect();

    rows.push(EntryRow {
        date: "TOTAL".to_string(),
        cash: entries.iter().map(|e| e.cash).sum(),
        card: entries.iter().map(|e| e.card).sum(),
        cheque: entries.iter().map(|e| e.cheque).sum(),
        expense: entries.iter().map(|e| e.expense).sum(),
        revenue: entries.iter().map(Entry::revenue).sum(),
        note: String::new(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..6), Alignment::right());
    table.to_string()
}

/// Format a single entry's details
pub fn format_entry_details(entry: &Entry, currency_symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry: {}\n", entry.date.format(date_format)));
    output.push_str(&format!(
        "  Cash:     {:>14}\n",
        entry.cash.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Card:     {:>14}\n",
        entry.card.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Cheque:   {:>14}\n",
        entry.cheque.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Expense:  {:>14}\n",
        entry.expense.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Revenue:  {:>14}\n",
        entry.revenue().format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Total:    {:>14}\n",
        entry.day_total().format_with_symbol(currency_symbol)
    ));

    if !entry.note.is_empty() {
        output.push_str(&format!("  Note:     {}\n", entry.note));
    }

    output.push_str(&format!(
        "  Updated:  {}\n",
        entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
