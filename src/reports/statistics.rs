//! Comparative statistics over a month of entries

use std::cmp::Ordering;

use chrono::{Datelike, Weekday};

use crate::models::{Entry, Money, PaymentMethod};

use super::aggregate::Totals;
use super::calendar::WEEKDAY_ORDER;

/// Revenue divided by the number of days that have an entry
///
/// Zero when no day has an entry.
pub fn average_per_active_day(totals: &Totals, entry_count: usize) -> Money {
    totals.revenue().div_round(entry_count)
}

/// Cumulative revenue and entry count for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayStat {
    pub weekday: Weekday,
    pub revenue: Money,
    pub entry_count: usize,
}

impl WeekdayStat {
    /// Average revenue per entry on this weekday
    pub fn average(&self) -> Money {
        self.revenue.div_round(self.entry_count)
    }

    /// Compare exact averages without rounding to the cent
    fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.revenue.cents()) * other.entry_count as i128;
        let rhs = i128::from(other.revenue.cents()) * self.entry_count as i128;
        lhs.cmp(&rhs)
    }
}

/// Revenue and entry count per weekday, Sunday first
///
/// Weekdays without any entry are left out rather than reported as zero.
pub fn weekday_performance<'a, I>(entries: I) -> Vec<WeekdayStat>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut stats: Vec<WeekdayStat> = WEEKDAY_ORDER
        .iter()
        .map(|&weekday| WeekdayStat {
            weekday,
            revenue: Money::zero(),
            entry_count: 0,
        })
        .collect();

    for entry in entries {
        let slot = entry.date.weekday().num_days_from_sunday() as usize;
        stats[slot].revenue += entry.revenue();
        stats[slot].entry_count += 1;
    }

    stats.retain(|s| s.entry_count > 0);
    stats
}

/// The weekday with the highest average revenue
///
/// Ties go to the weekday listed first. There is no minimum number of
/// entries, so a single strong day can win.
pub fn best_weekday(stats: &[WeekdayStat]) -> Option<Weekday> {
    stats
        .iter()
        .fold(None::<&WeekdayStat>, |best, stat| match best {
            Some(current) if stat.cmp_average(current) != Ordering::Greater => Some(current),
            _ => Some(stat),
        })
        .map(|s| s.weekday)
}

/// One slice of the payment-method breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub amount: Money,
    /// Share of the included slices, 0-100
    pub percentage: f64,
}

/// Break revenue down by payment method
///
/// Only methods with a strictly positive sum appear.
pub fn payment_distribution(totals: &Totals) -> Vec<PaymentShare> {
    let included: Vec<(PaymentMethod, Money)> = PaymentMethod::all()
        .iter()
        .map(|&method| (method, totals.amount(method)))
        .filter(|(_, amount)| amount.is_positive())
        .collect();

    let total: Money = included.iter().map(|(_, amount)| *amount).sum();

    included
        .into_iter()
        .map(|(method, amount)| PaymentShare {
            method,
            amount,
            percentage: if total.is_zero() {
                0.0
            } else {
                amount.cents() as f64 / total.cents() as f64 * 100.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash_entry(date: NaiveDate, cents: i64) -> Entry {
        Entry::with_amounts(
            date,
            Money::from_cents(cents),
            Money::zero(),
            Money::zero(),
            Money::zero(),
        )
    }

    #[test]
    fn test_average_per_active_day() {
        let totals = Totals {
            cash: Money::from_cents(1000),
            card: Money::from_cents(1000),
            cheque: Money::zero(),
            expense: Money::from_cents(-500),
        };
        assert_eq!(average_per_active_day(&totals, 3), Money::from_cents(667));
        assert_eq!(average_per_active_day(&totals, 0), Money::zero());
        assert_eq!(average_per_active_day(&Totals::default(), 0), Money::zero());
    }

    #[test]
    fn test_weekday_performance_skips_empty_weekdays() {
        // 2024-06-03 and 2024-06-10 are Mondays, 2024-06-02 a Sunday
        let entries = vec![
            cash_entry(date(2024, 6, 3), 15000),
            cash_entry(date(2024, 6, 10), 20000),
            cash_entry(date(2024, 6, 2), 100),
        ];
        let stats = weekday_performance(&entries);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].weekday, Weekday::Sun);
        assert_eq!(stats[1].weekday, Weekday::Mon);
        assert_eq!(stats[1].entry_count, 2);
        assert_eq!(stats[1].revenue, Money::from_cents(35000));
        assert_eq!(stats[1].average(), Money::from_cents(17500));
    }

    #[test]
    fn test_weekday_revenue_ignores_expense() {
        let entries = vec![Entry::with_amounts(
            date(2024, 6, 3),
            Money::from_cents(100),
            Money::from_cents(50),
            Money::zero(),
            Money::from_cents(-10),
        )];
        let stats = weekday_performance(&entries);
        assert_eq!(stats[0].revenue, Money::from_cents(150));
    }

    #[test]
    fn test_best_weekday() {
        let entries = vec![
            cash_entry(date(2024, 6, 2), 100),
            cash_entry(date(2024, 6, 4), 900),
            cash_entry(date(2024, 6, 5), 500),
        ];
        let stats = weekday_performance(&entries);
        assert_eq!(best_weekday(&stats), Some(Weekday::Tue));
    }

    #[test]
    fn test_best_weekday_tie_goes_to_earlier_weekday() {
        // Saturday 1st and Monday 3rd with equal revenue: Monday precedes Saturday
        let entries = vec![
            cash_entry(date(2024, 6, 1), 500),
            cash_entry(date(2024, 6, 3), 500),
        ];
        let stats = weekday_performance(&entries);
        assert_eq!(best_weekday(&stats), Some(Weekday::Mon));

        // Sunday ties with Monday and wins
        let entries = vec![
            cash_entry(date(2024, 6, 3), 500),
            cash_entry(date(2024, 6, 2), 500),
        ];
        let stats = weekday_performance(&entries);
        assert_eq!(best_weekday(&stats), Some(Weekday::Sun));
    }

    #[test]
    fn test_best_weekday_compares_unrounded_averages() {
        // Monday averages 3.33, Tuesday 3.3325: equal once rounded to the cent
        let entries = vec![
            cash_entry(date(2024, 6, 3), 333),
            cash_entry(date(2024, 6, 4), 333),
            cash_entry(date(2024, 6, 11), 333),
            cash_entry(date(2024, 6, 18), 333),
            cash_entry(date(2024, 6, 25), 334),
        ];
        let stats = weekday_performance(&entries);
        assert_eq!(stats[0].average(), stats[1].average());
        assert_eq!(best_weekday(&stats), Some(Weekday::Tue));
    }

    #[test]
    fn test_best_weekday_without_entries() {
        assert_eq!(best_weekday(&weekday_performance(&Vec::<Entry>::new())), None);
    }

    #[test]
    fn test_payment_distribution_omits_zero_methods() {
        let totals = Totals {
            cash: Money::from_cents(50000),
            card: Money::from_cents(30000),
            cheque: Money::zero(),
            expense: Money::from_cents(-5000),
        };
        let shares = payment_distribution(&totals);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].method, PaymentMethod::Cash);
        assert_eq!(shares[1].method, PaymentMethod::Card);
        assert!((shares[0].percentage - 62.5).abs() < 1e-9);
        assert!((shares[1].percentage - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_payment_distribution_omits_negative_methods() {
        let totals = Totals {
            cash: Money::from_cents(-100),
            card: Money::zero(),
            cheque: Money::from_cents(200),
            expense: Money::zero(),
        };
        let shares = payment_distribution(&totals);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].method, PaymentMethod::Cheque);
        assert!((shares[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_payment_distribution_empty() {
        assert!(payment_distribution(&Totals::default()).is_empty());
    }
}
