//! Core data models for the till ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: daily entries, money amounts and calendar months.

pub mod entry;
pub mod money;
pub mod month;

pub use entry::{Entry, PaymentMethod};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};
