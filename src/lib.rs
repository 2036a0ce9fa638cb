//! till - daily cash-register ledger
//!
//! This library provides the core functionality for the `till` command line
//! application. A user records, per calendar day, what the register took in
//! as cash, card and cheque payments and what was paid out of the drawer;
//! the library derives daily, weekly and monthly rollups, a payment-method
//! breakdown and the best-performing weekday.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, money, months)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `reports`: Calendar bucketing, aggregation and statistics
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::{NaiveDate, Weekday};
//! use till::models::{Entry, Money};
//! use till::reports::MonthlyReport;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let entry = Entry::with_amounts(
//!     day,
//!     Money::from_cents(10000),
//!     Money::from_cents(5000),
//!     Money::zero(),
//!     Money::from_cents(-1000),
//! );
//!
//! let report = MonthlyReport::generate(&[entry], day, Weekday::Sun);
//! assert_eq!(report.revenue(), Money::from_cents(15000));
//! assert_eq!(report.best_weekday(), Some(Weekday::Mon));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TillError;
