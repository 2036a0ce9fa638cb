//! Report formatting for terminal output
//!
//! Renders the monthly sheet and its statistics as tables.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::reports::aggregate::Totals;
use crate::reports::calendar::weekday_name;
use crate::reports::MonthlyReport;

const BAR_WIDTH: usize = 30;

/// One line of the month sheet: a day, a week rollup or the month total
#[derive(Tabled)]
struct SheetRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Cash")]
    cash: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Cheque")]
    cheque: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl SheetRow {
    fn new(date: String, day: String, totals: &Totals) -> Self {
        Self {
            date,
            day,
            cash: totals.cash.to_string(),
            card: totals.card.to_string(),
            cheque: totals.cheque.to_string(),
            expense: totals.expense.to_string(),
            total: totals.net().to_string(),
        }
    }
}

#[derive(Tabled)]
struct WeekdayRow {
    #[tabled(rename = "Weekday")]
    weekday: &'static str,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Revenue")]
    revenue: Money,
    #[tabled(rename = "Average")]
    average: Money,
}

fn render<T: Tabled>(rows: Vec<T>, numeric_from: usize) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(numeric_from..), Alignment::right());
    table.to_string()
}

/// Format the full monthly report: the sheet followed by its statistics
pub fn format_monthly_report(report: &MonthlyReport, currency_symbol: &str) -> String {
    let mut output = format_month_sheet(report, currency_symbol);
    output.push('\n');
    output.push_str(&format_statistics(report, currency_symbol));
    output
}

/// Format the day-by-day sheet with a rollup row after each week
pub fn format_month_sheet(report: &MonthlyReport, currency_symbol: &str) -> String {
    let mut rows = Vec::with_capacity(report.days().len() + report.weeks().len() + 1);

    for week in report.weeks() {
        for day in &week.days {
            let date = if day.has_entry {
                day.date.format("%Y-%m-%d").to_string()
            } else {
                format!("{} -", day.date.format("%Y-%m-%d"))
            };
            rows.push(SheetRow::new(
                date,
                day.date.format("%a").to_string(),
                &day.totals,
            ));
        }

        let label = if week.is_partial() {
            format!("Week {} (partial week)", week.number)
        } else {
            format!("Week {}", week.number)
        };
        rows.push(SheetRow::new(label, String::new(), &week.totals));
    }

    rows.push(SheetRow::new(
        "Month".to_string(),
        String::new(),
        report.totals(),
    ));

    let mut output = format!(
        "Month sheet: {} (weeks end on {})\n",
        report.month(),
        weekday_name(report.week_end())
    );
    output.push_str(&render(rows, 2));
    output.push('\n');
    output.push_str(&format!(
        "Column total: {}\n",
        report.week_totals_sum().format_with_symbol(currency_symbol)
    ));
    output
}

/// Format the month totals, averages, weekday performance and distribution
pub fn format_statistics(report: &MonthlyReport, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Statistics for {}\n", report.month()));
    output.push_str(&format!(
        "  Revenue:          {}\n",
        report.revenue().format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Net:              {}\n",
        report.net().format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("  Days recorded:    {}\n", report.entry_count()));
    output.push_str(&format!(
        "  Average per day:  {}\n",
        report.average_per_day().format_with_symbol(currency_symbol)
    ));

    match (report.best_weekday(), report.best_weekday_average()) {
        (Some(weekday), Some(average)) => output.push_str(&format!(
            "  Best weekday:     {} ({})\n",
            weekday_name(weekday),
            average.format_with_symbol(currency_symbol)
        )),
        _ => output.push_str("  Best weekday:     n/a\n"),
    }

    if !report.weekday_stats().is_empty() {
        let rows: Vec<WeekdayRow> = report
            .weekday_stats()
            .iter()
            .map(|s| WeekdayRow {
                weekday: weekday_name(s.weekday),
                entries: s.entry_count,
                revenue: s.revenue,
                average: s.average(),
            })
            .collect();
        output.push('\n');
        output.push_str(&render(rows, 1));
        output.push('\n');
    }

    output.push_str("\nPayment methods\n");
    if report.distribution().is_empty() {
        output.push_str("  No revenue recorded.\n");
    }
    for share in report.distribution() {
        output.push_str(&format!(
            "  {:<8} {:>14} {:>6}  {}\n",
            share.method,
            share.amount.format_with_symbol(currency_symbol),
            format_percentage(share.percentage),
            format_bar(share.percentage, 100.0, BAR_WIDTH)
        ));
    }

    output
}

/// Format the revenue of each day as a horizontal bar chart
pub fn format_daily_chart(report: &MonthlyReport) -> String {
    let series = report.daily_revenue();
    let max = series
        .iter()
        .map(|(_, revenue)| revenue.as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = format!("Daily revenue for {}\n", report.month());
    for (date, revenue) in series {
        output.push_str(&format!(
            "{} {} {:>12}\n",
            date.format("%d %a"),
            format_bar(revenue.as_f64(), max, BAR_WIDTH),
            revenue
        ));
    }
    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_report() -> MonthlyReport {
        let entries = vec![
            Entry::with_amounts(
                date(2024, 7, 3),
                Money::from_cents(50000),
                Money::from_cents(30000),
                Money::zero(),
                Money::from_cents(-5000),
            ),
            Entry::with_amounts(
                date(2024, 7, 30),
                Money::from_cents(1000),
                Money::zero(),
                Money::zero(),
                Money::zero(),
            ),
        ];
        MonthlyReport::generate(&entries, date(2024, 7, 1), Weekday::Sun)
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_month_sheet_rows() {
        let sheet = format_month_sheet(&sample_report(), "€");

        assert!(sheet.contains("Month sheet: 2024-07 (weeks end on Sunday)"));
        assert!(sheet.contains("Week 1"));
        assert!(sheet.contains("Week 5 (partial week)"));
        assert!(sheet.contains("750.00"));
        assert!(sheet.contains("Column total: 760.00 €"));
    }

    #[test]
    fn test_monthly_report_has_sheet_then_statistics() {
        let output = format_monthly_report(&sample_report(), "€");

        let sheet_at = output.find("Month sheet: 2024-07").unwrap();
        let stats_at = output.find("Best weekday:").unwrap();
        assert!(sheet_at < stats_at);
        assert!(output.contains("Week 1"));
        assert!(output.contains("Wednesday"));
    }

    #[test]
    fn test_statistics_section() {
        let stats = format_statistics(&sample_report(), "€");

        assert!(stats.contains("Revenue:          810.00 €"));
        assert!(stats.contains("Net:              760.00 €"));
        assert!(stats.contains("Average per day:  405.00 €"));
        assert!(stats.contains("Best weekday:     Wednesday (800.00 €)"));
        assert!(stats.contains("Cash"));
        assert!(!stats.contains("Cheque"));
    }

    #[test]
    fn test_statistics_for_empty_month() {
        let report = MonthlyReport::generate(&[], date(2024, 7, 1), Weekday::Sun);
        let stats = format_statistics(&report, "€");

        assert!(stats.contains("Best weekday:     n/a"));
        assert!(stats.contains("No revenue recorded."));
    }

    #[test]
    fn test_daily_chart_has_a_line_per_day() {
        let chart = format_daily_chart(&sample_report());
        assert_eq!(chart.lines().count(), 32);
        assert!(chart.contains("03 Wed"));
    }
}
