//! Daily till entry model
//!
//! An entry is one calendar day's recorded activity at the cash register:
//! what came in as cash, card and cheque payments, and what was paid out of
//! the drawer. The date is the natural key; there is at most one entry per day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{deserialize_lenient, Money};

/// The payment methods that make up revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Cheque,
}

impl PaymentMethod {
    /// All payment methods, in display order
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Cheque]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cheque => "Cheque",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One day's recorded till activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Calendar date, unique across the ledger
    pub date: NaiveDate,

    /// Cash received
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub cash: Money,

    /// Card payments received
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub card: Money,

    /// Cheque payments received
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub cheque: Money,

    /// Cash expenditure taken from the drawer, stored as entered
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub expense: Money,

    /// Free-text note for the day
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,

    /// When the entry was first recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry for a date with every amount at zero
    pub fn new(date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            date,
            cash: Money::zero(),
            card: Money::zero(),
            cheque: Money::zero(),
            expense: Money::zero(),
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an entry with all four amounts set
    pub fn with_amounts(
        date: NaiveDate,
        cash: Money,
        card: Money,
        cheque: Money,
        expense: Money,
    ) -> Self {
        let mut entry = Self::new(date);
        entry.cash = cash;
        entry.card = card;
        entry.cheque = cheque;
        entry.expense = expense;
        entry
    }

    /// Replace the four amounts, bumping the modification time
    pub fn set_amounts(&mut self, cash: Money, card: Money, cheque: Money, expense: Money) {
        self.cash = cash;
        self.card = card;
        self.cheque = cheque;
        self.expense = expense;
        self.updated_at = Utc::now();
    }

    /// Set the note, bumping the modification time
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.updated_at = Utc::now();
    }

    /// Amount received through one payment method
    pub fn amount(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Cheque => self.cheque,
        }
    }

    /// Money taken in: cash + card + cheque
    pub fn revenue(&self) -> Money {
        self.cash + self.card + self.cheque
    }

    /// Signed total of all four columns, as shown in the day's total column
    pub fn day_total(&self) -> Money {
        self.revenue() + self.expense
    }

    /// Summarize which amounts differ between two versions of an entry
    ///
    /// Returns `None` when no amount or note changed.
    pub fn diff_summary(&self, after: &Entry) -> Option<String> {
        let mut changes = Vec::new();

        let fields = [
            ("cash", self.cash, after.cash),
            ("card", self.card, after.card),
            ("cheque", self.cheque, after.cheque),
            ("expense", self.expense, after.expense),
        ];
        for (name, before, now) in fields {
            if before != now {
                changes.push(format!("{}: {} -> {}", name, before, now));
            }
        }
        if self.note != after.note {
            changes.push(format!("note: {:?} -> {:?}", self.note, after.note));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}
