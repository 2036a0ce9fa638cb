//! Reporting engine for the till ledger
//!
//! Turns a snapshot of entries into the monthly sheet: the days of the
//! month, weekly rollups, month totals and comparative statistics. Every
//! function here is pure; nothing reads from or writes to storage.

pub mod aggregate;
pub mod calendar;
pub mod monthly;
pub mod statistics;

pub use aggregate::{DayBucket, EntryIndex, Totals, WeekBucket};
pub use calendar::{month_days, partition_weeks, weekday_name, WEEKDAY_ORDER};
pub use monthly::MonthlyReport;
pub use statistics::{PaymentShare, WeekdayStat};
