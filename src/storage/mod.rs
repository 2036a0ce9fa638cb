//! Storage layer for the till ledger
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit hooks services call after every change.

pub mod entries;
pub mod file_io;

pub use entries::{EntryRepository, EntryStore};
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TillPaths;
use crate::error::TillError;

/// Main storage coordinator that provides access to the repositories
pub struct Storage {
    paths: TillPaths,
    pub entries: EntryRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TillPaths) -> Result<Self, TillError> {
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryRepository::new(paths.entries_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit logging on or off
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit_enabled = enabled;
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TillPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TillError> {
        self.entries.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TillError> {
        self.entries.save()
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), TillError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity))
    }

    /// Record an update operation in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), TillError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), TillError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity))
    }

    /// Record several prepared audit entries at once
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), TillError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log_batch(entries)
    }
}
