//! Calendar bucketing
//!
//! Produces the ordered days of a month and splits them into weeks that
//! close on a configurable weekday. Everything here is a pure function of
//! its arguments.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::Month;

/// Weekdays in the order used for tie-breaking and display, Sunday first
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Every day of the month containing `reference`, ascending
pub fn month_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let month = Month::containing(reference);
    month
        .first_day()
        .iter_days()
        .take_while(|day| month.contains(*day))
        .collect()
}

/// Split an ascending run of days into weeks
///
/// A week closes on a day falling on `week_end`, or on the final day of the
/// run. Given the output of [`month_days`], the final day is the month end, so
/// a month ending on `week_end` never yields an empty trailing week.
pub fn partition_weeks(days: &[NaiveDate], week_end: Weekday) -> Vec<Vec<NaiveDate>> {
    let last_index = days.len().saturating_sub(1);

    let (weeks, _) = days.iter().enumerate().fold(
        (Vec::new(), Vec::new()),
        |(mut weeks, mut current): (Vec<Vec<NaiveDate>>, Vec<NaiveDate>), (index, &day)| {
            current.push(day);
            if day.weekday() == week_end || index == last_index {
                weeks.push(current);
                (weeks, Vec::new())
            } else {
                (weeks, current)
            }
        },
    );

    weeks
}

/// Full English name of a weekday
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_days_length() {
        assert_eq!(month_days(date(2024, 2, 14)).len(), 29);
        assert_eq!(month_days(date(2023, 2, 1)).len(), 28);
        assert_eq!(month_days(date(2024, 4, 30)).len(), 30);
        assert_eq!(month_days(date(2024, 12, 25)).len(), 31);
    }

    #[test]
    fn test_month_days_bounds_and_order() {
        let days = month_days(date(2024, 6, 17));
        assert_eq!(days.first(), Some(&date(2024, 6, 1)));
        assert_eq!(days.last(), Some(&date(2024, 6, 30)));
        assert!(days.windows(2).all(|w| w[0].succ_opt() == Some(w[1])));
    }

    #[test]
    fn test_month_days_is_restartable() {
        let reference = date(2024, 2, 29);
        assert_eq!(month_days(reference), month_days(reference));
    }

    #[test]
    fn test_june_2024_sunday_weeks() {
        // June 1st 2024 is a Saturday, June 30th a Sunday
        let days = month_days(date(2024, 6, 1));
        let weeks = partition_weeks(&days, Weekday::Sun);

        let lengths: Vec<_> = weeks.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![2, 7, 7, 7, 7]);
        assert_eq!(weeks[0], vec![date(2024, 6, 1), date(2024, 6, 2)]);
        assert_eq!(weeks.last().unwrap().last(), Some(&date(2024, 6, 30)));
    }

    #[test]
    fn test_partial_last_week() {
        // July 2024 ends on a Wednesday
        let days = month_days(date(2024, 7, 1));
        let weeks = partition_weeks(&days, Weekday::Sun);

        let lengths: Vec<_> = weeks.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![7, 7, 7, 7, 3]);
    }

    #[test]
    fn test_configurable_boundary() {
        // February 2026 starts on a Sunday and has exactly four weeks of days
        let days = month_days(date(2026, 2, 1));
        let sunday_weeks = partition_weeks(&days, Weekday::Sun);
        let saturday_weeks = partition_weeks(&days, Weekday::Sat);

        let lengths = |weeks: &[Vec<NaiveDate>]| weeks.iter().map(Vec::len).collect::<Vec<_>>();
        assert_eq!(lengths(&sunday_weeks), vec![1, 7, 7, 7, 6]);
        assert_eq!(lengths(&saturday_weeks), vec![7, 7, 7, 7]);
    }

    #[test]
    fn test_weeks_reconstruct_days() {
        for month in 1..=12 {
            let days = month_days(date(2024, month, 1));
            for week_end in WEEKDAY_ORDER {
                let weeks = partition_weeks(&days, week_end);
                let flattened: Vec<_> = weeks.iter().flatten().copied().collect();
                assert_eq!(flattened, days);

                assert!(weeks.iter().all(|w| (1..=7).contains(&w.len())));
                if weeks.len() > 2 {
                    assert!(weeks[1..weeks.len() - 1].iter().all(|w| w.len() == 7));
                }
            }
        }
    }

    #[test]
    fn test_empty_run() {
        assert!(partition_weeks(&[], Weekday::Sun).is_empty());
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(WEEKDAY_ORDER[0]), "Sunday");
    }
}
