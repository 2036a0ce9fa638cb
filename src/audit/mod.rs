//! Audit logging for the till ledger
//!
//! Records every create, update and delete of a day's entry, with
//! before/after values, in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit record with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: appends records to the audit log file using a
//!   line-delimited JSON format (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use till::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let record = AuditEntry::create(EntityType::Entry, "2024-06-03", &entry);
//! logger.log(&record)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
