//! Entry service
//!
//! Provides business logic for recording, reading and deleting daily entries,
//! and for building the monthly report from the stored ledger.

use chrono::{NaiveDate, Weekday};

use crate::audit::EntityType;
use crate::error::{TillError, TillResult};
use crate::models::{Entry, Money, Month};
use crate::reports::MonthlyReport;
use crate::storage::{EntryStore, Storage};

/// Amounts to record for a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryAmounts {
    pub cash: Money,
    pub card: Money,
    pub cheque: Money,
    pub expense: Money,
}

impl EntryAmounts {
    /// Build amounts from raw text, coercing anything unparseable to zero
    pub fn parse_lenient(
        cash: Option<&str>,
        card: Option<&str>,
        cheque: Option<&str>,
        expense: Option<&str>,
    ) -> Self {
        let parse = |s: Option<&str>| s.map(Money::parse_or_zero).unwrap_or_default();
        Self {
            cash: parse(cash),
            card: parse(card),
            cheque: parse(cheque),
            expense: parse(expense),
        }
    }
}

/// Whether a record call created a new entry or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Created,
    Updated,
}

/// Service for daily entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record the amounts for a day, replacing any entry already there
    pub fn record(
        &self,
        date: NaiveDate,
        amounts: EntryAmounts,
        note: Option<String>,
    ) -> TillResult<(Entry, RecordOutcome)> {
        let EntryAmounts {
            cash,
            card,
            cheque,
            expense,
        } = amounts;

        if let Some(before) = self.storage.entries.get(date)? {
            let mut updated = before.clone();
            updated.set_amounts(cash, card, cheque, expense);
            if let Some(n) = note {
                updated.set_note(n);
            }

            self.storage.entries.upsert(updated.clone())?;
            self.storage.entries.commit()?;

            self.storage.log_update(
                EntityType::Entry,
                date.to_string(),
                &before,
                &updated,
                before.diff_summary(&updated),
            )?;

            tracing::debug!(%date, "updated entry");
            Ok((updated, RecordOutcome::Updated))
        } else {
            let mut entry = Entry::with_amounts(date, cash, card, cheque, expense);
            if let Some(n) = note {
                entry.set_note(n);
            }

            self.storage.entries.upsert(entry.clone())?;
            self.storage.entries.commit()?;

            self.storage
                .log_create(EntityType::Entry, date.to_string(), &entry)?;

            tracing::debug!(%date, "created entry");
            Ok((entry, RecordOutcome::Created))
        }
    }

    /// Get the entry for a date
    pub fn get(&self, date: NaiveDate) -> TillResult<Entry> {
        self.storage
            .entries
            .get(date)?
            .ok_or_else(|| TillError::entry_not_found(date))
    }

    /// Delete the entry for a date
    pub fn delete(&self, date: NaiveDate) -> TillResult<Entry> {
        let entry = self.get(date)?;

        self.storage.entries.delete_by_date(date)?;
        self.storage.entries.commit()?;

        self.storage
            .log_delete(EntityType::Entry, date.to_string(), &entry)?;

        tracing::debug!(%date, "deleted entry");
        Ok(entry)
    }

    /// Entries of one month, ascending by date
    pub fn list_month(&self, month: Month) -> TillResult<Vec<Entry>> {
        self.storage.entries.get_by_month(month)
    }

    /// Every entry, ascending by date
    pub fn list_all(&self) -> TillResult<Vec<Entry>> {
        self.storage.entries.get_all()
    }

    /// Build the report for the month containing `reference`
    pub fn monthly_report(&self, reference: NaiveDate, week_end: Weekday) -> TillResult<MonthlyReport> {
        let snapshot = self.storage.entries.fetch_all()?;
        Ok(MonthlyReport::generate(&snapshot, reference, week_end))
    }
}
