//! Service layer for the till ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! recording entries with their audit trail, importing CSV data and building
//! reports from the stored ledger.

pub mod entry;
pub mod import;

pub use entry::{EntryAmounts, EntryService, RecordOutcome};
pub use import::{ImportService, ImportSummary, SkippedRow};
