//! Aggregation of entries into day, week and month sums
//!
//! Entries are mapped onto the days of a month through a date index; days
//! without an entry are zero-filled. Week sums are computed per week from
//! that week's own days, so nothing carries over from one week to the next.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{Entry, Money, Month, PaymentMethod};

use super::calendar::partition_weeks;

/// Sums of the four recorded columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub cash: Money,
    pub card: Money,
    pub cheque: Money,
    pub expense: Money,
}

impl Totals {
    /// Money taken in: cash + card + cheque
    pub fn revenue(&self) -> Money {
        self.cash + self.card + self.cheque
    }

    /// Revenue combined with the expense column as recorded
    ///
    /// Expense is added with whatever sign it was entered with, matching the
    /// total column of the paper sheet. Treat [`Totals::revenue`] as the
    /// income figure.
    pub fn net(&self) -> Money {
        self.revenue() + self.expense
    }

    /// Sum received through one payment method
    pub fn amount(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Cheque => self.cheque,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Entry> for Totals {
    fn from(entry: &Entry) -> Self {
        Self {
            cash: entry.cash,
            card: entry.card,
            cheque: entry.cheque,
            expense: entry.expense,
        }
    }
}

impl Add for Totals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            cash: self.cash + other.cash,
            card: self.card + other.card,
            cheque: self.cheque + other.cheque,
            expense: self.expense + other.expense,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::default(), |acc, t| acc + t)
    }
}

impl<'a> Sum<&'a Totals> for Totals {
    fn sum<I: Iterator<Item = &'a Totals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Date-keyed view over a snapshot of entries
pub struct EntryIndex<'a> {
    by_date: BTreeMap<NaiveDate, &'a Entry>,
}

impl<'a> EntryIndex<'a> {
    /// Index a snapshot; if a date appears twice the later entry wins
    pub fn new(entries: &'a [Entry]) -> Self {
        Self {
            by_date: entries.iter().map(|e| (e.date, e)).collect(),
        }
    }

    /// The entry recorded for a date, if any
    pub fn get(&self, date: NaiveDate) -> Option<&'a Entry> {
        self.by_date.get(&date).copied()
    }

    /// The amounts recorded for a date, zero when nothing was recorded
    pub fn get_day_data(&self, date: NaiveDate) -> Totals {
        self.get(date).map(Totals::from).unwrap_or_default()
    }

    /// Entries of one month, ascending by date
    pub fn month_entries(&self, month: Month) -> Vec<&'a Entry> {
        self.by_date
            .range(month.first_day()..=month.last_day())
            .map(|(_, entry)| *entry)
            .collect()
    }
}

/// One day of the displayed month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub totals: Totals,
    /// Whether an entry was recorded for this day
    pub has_entry: bool,
}

impl DayBucket {
    /// Signed total of the four columns
    pub fn total(&self) -> Money {
        self.totals.net()
    }

    pub fn revenue(&self) -> Money {
        self.totals.revenue()
    }
}

/// A run of consecutive days closed by the boundary weekday or month end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// 1-based week number within the month
    pub number: u32,
    pub days: Vec<DayBucket>,
    pub totals: Totals,
    closed_on_boundary: bool,
}

impl WeekBucket {
    /// True when the month ended before the boundary weekday was reached
    pub fn is_partial(&self) -> bool {
        !self.closed_on_boundary
    }

    /// Signed total of the week's four column sums
    pub fn total(&self) -> Money {
        self.totals.net()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }
}

/// Pair each day with its entry amounts or zeros
pub fn build_day_buckets(days: &[NaiveDate], index: &EntryIndex<'_>) -> Vec<DayBucket> {
    days.iter()
        .map(|&date| DayBucket {
            date,
            totals: index.get_day_data(date),
            has_entry: index.get(date).is_some(),
        })
        .collect()
}

/// Group day buckets into weeks and sum each week independently
pub fn build_week_buckets(days: &[DayBucket], week_end: Weekday) -> Vec<WeekBucket> {
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    let mut remaining = days.iter();

    partition_weeks(&dates, week_end)
        .into_iter()
        .zip(1u32..)
        .map(|(week_dates, number)| {
            let week_days: Vec<DayBucket> =
                remaining.by_ref().take(week_dates.len()).cloned().collect();
            let totals = week_days.iter().map(|d| &d.totals).sum();
            let closed_on_boundary = week_dates
                .last()
                .map(|d| d.weekday() == week_end)
                .unwrap_or(false);

            WeekBucket {
                number,
                days: week_days,
                totals,
                closed_on_boundary,
            }
        })
        .collect()
}

/// Per-column sums over exactly the indexed entries dated within `month`
///
/// Summing through the index keeps a duplicated date counted once, the same
/// way the day buckets see it.
pub fn monthly_totals(index: &EntryIndex<'_>, month: Month) -> Totals {
    index
        .month_entries(month)
        .into_iter()
        .map(Totals::from)
        .sum()
}
