//! Monthly Report
//!
//! Assembles the day sheet, week rollups, month totals and statistics for the
//! month containing a reference date. A report is a snapshot: it is computed
//! from the entries it is given and never changes afterwards.

use chrono::{NaiveDate, Weekday};

use crate::models::{Entry, Money, Month};

use super::aggregate::{
    build_day_buckets, build_week_buckets, monthly_totals, DayBucket, EntryIndex, Totals,
    WeekBucket,
};
use super::calendar::month_days;
use super::statistics::{
    average_per_active_day, best_weekday, payment_distribution, weekday_performance,
    PaymentShare, WeekdayStat,
};

/// Everything shown for one month of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    month: Month,
    week_end: Weekday,
    days: Vec<DayBucket>,
    weeks: Vec<WeekBucket>,
    totals: Totals,
    entries: Vec<Entry>,
    average_per_day: Money,
    weekday_stats: Vec<WeekdayStat>,
    best_weekday: Option<Weekday>,
    distribution: Vec<PaymentShare>,
}

impl MonthlyReport {
    /// Generate the report for the month containing `reference`
    ///
    /// `entries` may be in any order and may include other months.
    pub fn generate(entries: &[Entry], reference: NaiveDate, week_end: Weekday) -> Self {
        let month = Month::containing(reference);
        let index = EntryIndex::new(entries);

        let days = build_day_buckets(&month_days(reference), &index);
        let weeks = build_week_buckets(&days, week_end);
        let totals = monthly_totals(&index, month);

        let month_entries: Vec<Entry> = index.month_entries(month).into_iter().cloned().collect();
        let weekday_stats = weekday_performance(&month_entries);
        let best_weekday = best_weekday(&weekday_stats);

        tracing::debug!(
            month = %month,
            entries = month_entries.len(),
            weeks = weeks.len(),
            "generated monthly report"
        );

        Self {
            month,
            week_end,
            average_per_day: average_per_active_day(&totals, month_entries.len()),
            distribution: payment_distribution(&totals),
            days,
            weeks,
            totals,
            entries: month_entries,
            weekday_stats,
            best_weekday,
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Weekday that closes each week
    pub fn week_end(&self) -> Weekday {
        self.week_end
    }

    /// One bucket per calendar day, ascending
    pub fn days(&self) -> &[DayBucket] {
        &self.days
    }

    /// Week rollups, ascending
    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// The month's recorded entries, ascending by date
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of days with an entry
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn revenue(&self) -> Money {
        self.totals.revenue()
    }

    pub fn net(&self) -> Money {
        self.totals.net()
    }

    /// Revenue per day that has an entry, zero for an empty month
    pub fn average_per_day(&self) -> Money {
        self.average_per_day
    }

    /// Per-weekday revenue, only for weekdays with entries, Sunday first
    pub fn weekday_stats(&self) -> &[WeekdayStat] {
        &self.weekday_stats
    }

    pub fn best_weekday(&self) -> Option<Weekday> {
        self.best_weekday
    }

    /// Average revenue of the best weekday
    pub fn best_weekday_average(&self) -> Option<Money> {
        let best = self.best_weekday?;
        self.weekday_stats
            .iter()
            .find(|s| s.weekday == best)
            .map(WeekdayStat::average)
    }

    pub fn distribution(&self) -> &[PaymentShare] {
        &self.distribution
    }

    /// Revenue of every day of the month, in calendar order
    pub fn daily_revenue(&self) -> Vec<(NaiveDate, Money)> {
        self.days.iter().map(|d| (d.date, d.revenue())).collect()
    }

    /// Sum of the weekly totals; equal to [`MonthlyReport::net`]
    pub fn week_totals_sum(&self) -> Money {
        self.weeks.iter().map(WeekBucket::total).sum()
    }
}
