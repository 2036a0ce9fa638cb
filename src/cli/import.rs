//! CLI command handler for CSV import

use std::path::Path;

use crate::error::{TillError, TillResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> TillResult<()> {
    if !file.exists() {
        return Err(TillError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let summary = ImportService::new(storage).import_file(file)?;

    println!("Import Complete!");
    println!("  Imported:    {}", summary.imported);
    println!("    New days:  {}", summary.created);
    println!("    Replaced:  {}", summary.updated);
    if !summary.skipped.is_empty() {
        println!("  Skipped:     {}", summary.skipped.len());
        for row in &summary.skipped {
            println!("    Line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}
