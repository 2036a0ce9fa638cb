//! CSV Import service
//!
//! Imports daily entries from a flat CSV export: one row per day with the
//! date and the four amount columns. Amount cells are read leniently; rows
//! whose date cannot be read are skipped and reported.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TillError, TillResult};
use crate::models::{Entry, Money};
use crate::storage::{EntryStore, Storage};

/// Date formats accepted in the date column, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

const DATE_HEADERS: &[&str] = &["date"];
const CASH_HEADERS: &[&str] = &["cash", "especes", "espèces"];
const CARD_HEADERS: &[&str] = &["card", "cb"];
const CHEQUE_HEADERS: &[&str] = &["cheque", "cheques", "chèques"];
const EXPENSE_HEADERS: &[&str] = &["expense", "expenses", "depenses", "dépenses"];
const NOTE_HEADERS: &[&str] = &["note", "notes"];

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMapping {
    date: usize,
    cash: Option<usize>,
    card: Option<usize>,
    cheque: Option<usize>,
    expense: Option<usize>,
    note: Option<usize>,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> TillResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };

        let date = find(DATE_HEADERS)
            .ok_or_else(|| TillError::Import("CSV header has no date column".to_string()))?;

        Ok(Self {
            date,
            cash: find(CASH_HEADERS),
            card: find(CARD_HEADERS),
            cheque: find(CHEQUE_HEADERS),
            expense: find(EXPENSE_HEADERS),
            note: find(NOTE_HEADERS),
        })
    }

    fn amount(&self, record: &StringRecord, column: Option<usize>) -> Money {
        column
            .and_then(|c| record.get(c))
            .map(Money::parse_or_zero)
            .unwrap_or_default()
    }
}

/// A row read from the CSV, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// Line number in the file, header is line 1
    pub line: usize,
    pub date: NaiveDate,
    pub cash: Money,
    pub card: Money,
    pub cheque: Money,
    pub expense: Money,
    pub note: Option<String>,
}

/// A row left out of the import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Line number in the file, header is line 1
    pub line: usize,
    pub reason: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows written to the ledger
    pub imported: usize,
    /// Rows that created a new day
    pub created: usize,
    /// Rows that replaced an existing day
    pub updated: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Pick `;` when the header uses it more than `,`
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Parse CSV text into importable rows and skipped rows
pub fn parse_csv(content: &str) -> TillResult<(Vec<ParsedRow>, Vec<SkippedRow>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mapping = ColumnMapping::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(idx + 2);
                skipped.push(SkippedRow {
                    line,
                    reason: format!("Error reading CSV record: {}", e),
                });
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let raw_date = record.get(mapping.date).unwrap_or("");

        let Some(date) = parse_date(raw_date) else {
            tracing::warn!(line, date = raw_date, "skipping row with unreadable date");
            skipped.push(SkippedRow {
                line,
                reason: format!("Invalid date: {:?}", raw_date),
            });
            continue;
        };

        rows.push(ParsedRow {
            line,
            date,
            cash: mapping.amount(&record, mapping.cash),
            card: mapping.amount(&record, mapping.card),
            cheque: mapping.amount(&record, mapping.cheque),
            expense: mapping.amount(&record, mapping.expense),
            note: mapping
                .note
                .and_then(|c| record.get(c))
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        });
    }

    Ok((rows, skipped))
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a CSV file from disk
    pub fn import_file(&self, path: &Path) -> TillResult<ImportSummary> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TillError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.import_str(&content)
    }

    /// Import CSV text; later rows for the same date win
    pub fn import_str(&self, content: &str) -> TillResult<ImportSummary> {
        let (rows, skipped) = parse_csv(content)?;
        let mut summary = ImportSummary {
            skipped,
            ..Default::default()
        };
        let mut audit_entries = Vec::with_capacity(rows.len());

        for row in rows {
            let before = self.storage.entries.get(row.date)?;

            let mut entry = match &before {
                Some(existing) => {
                    let mut entry = existing.clone();
                    entry.set_amounts(row.cash, row.card, row.cheque, row.expense);
                    entry
                }
                None => Entry::with_amounts(row.date, row.cash, row.card, row.cheque, row.expense),
            };
            if let Some(note) = row.note {
                entry.set_note(note);
            }

            self.storage.entries.upsert(entry.clone())?;

            let id = row.date.to_string();
            match before {
                Some(before) => {
                    let diff = before.diff_summary(&entry);
                    audit_entries.push(AuditEntry::update(
                        EntityType::Entry,
                        id,
                        &before,
                        &entry,
                        diff,
                    ));
                    summary.updated += 1;
                }
                None => {
                    audit_entries.push(AuditEntry::create(EntityType::Entry, id, &entry));
                    summary.created += 1;
                }
            }
            summary.imported += 1;
        }

        if summary.imported > 0 {
            self.storage.entries.commit()?;
            self.storage.log_batch(&audit_entries)?;
        }

        tracing::info!(
            imported = summary.imported,
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped.len(),
            "csv import finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TillPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TillPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("date;cash;card"), b';');
        assert_eq!(detect_delimiter("date,cash,card"), b',');
        assert_eq!(detect_delimiter("\n\ndate;cash\n"), b';');
    }

    #[test]
    fn test_parse_english_header() {
        let csv = "date,cash,card,cheque,expense,note\n\
                   2024-06-03,100.00,50,0,-10,market\n";
        let (rows, skipped) = parse_csv(csv).unwrap();

        assert!(skipped.is_empty());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].date, date(2024, 6, 3));
        assert_eq!(rows[0].cash, Money::from_cents(10000));
        assert_eq!(rows[0].card, Money::from_cents(5000));
        assert_eq!(rows[0].expense, Money::from_cents(-1000));
        assert_eq!(rows[0].note.as_deref(), Some("market"));
    }

    #[test]
    fn test_parse_french_export() {
        let csv = "\u{feff}Date;Espèces;CB;Chèques;Dépenses;Total Jour\n\
                   03/06/2024;120,50;80;0;-15,25;185,25\n\
                   \n\
                   TOTAUX MOIS;120,50;80;0;-15,25;185,25\n";
        let (rows, skipped) = parse_csv(csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(2024, 6, 3));
        assert_eq!(rows[0].cash, Money::from_cents(12050));
        assert_eq!(rows[0].card, Money::from_cents(8000));
        assert_eq!(rows[0].expense, Money::from_cents(-1525));
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].reason.contains("TOTAUX MOIS"));
    }

    #[test]
    fn test_corrupt_amounts_become_zero() {
        let csv = "date;especes;cb;cheques;depenses\n2024-06-03;abc;;12;n/a\n";
        let (rows, _) = parse_csv(csv).unwrap();

        assert!(rows[0].cash.is_zero());
        assert!(rows[0].card.is_zero());
        assert_eq!(rows[0].cheque, Money::from_cents(1200));
        assert!(rows[0].expense.is_zero());
    }

    #[test]
    fn test_missing_columns_default_to_zero() {
        let (rows, _) = parse_csv("date,cash\n2024-06-03,5\n").unwrap();
        assert_eq!(rows[0].cash, Money::from_cents(500));
        assert!(rows[0].card.is_zero());
        assert!(rows[0].note.is_none());
    }

    #[test]
    fn test_missing_date_column_is_an_error() {
        let err = parse_csv("cash,card\n1,2\n").unwrap_err();
        assert!(matches!(err, TillError::Import(_)));
    }

    #[test]
    fn test_import_creates_updates_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let first = service
            .import_str("date,cash\n2024-06-03,10\n2024-06-04,20\n")
            .unwrap();
        assert_eq!(first.imported, 2);
        assert_eq!(first.created, 2);

        let second = service
            .import_str("date,cash\n2024-06-04,25\nbad,1\n2024-06-05,30\n2024-06-05,35\n")
            .unwrap();
        assert_eq!(second.imported, 3);
        assert_eq!(second.created, 1);
        assert_eq!(second.updated, 2);
        assert_eq!(second.skipped.len(), 1);
        assert_eq!(second.skipped[0].line, 3);

        assert_eq!(storage.entries.count().unwrap(), 3);
        let last = storage.entries.get(date(2024, 6, 5)).unwrap().unwrap();
        assert_eq!(last.cash, Money::from_cents(3500));

        assert_eq!(storage.audit().entry_count().unwrap(), 5);
    }

    #[test]
    fn test_import_file_missing() {
        let (temp_dir, storage) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_file(&temp_dir.path().join("missing.csv"))
            .unwrap_err();
        assert!(matches!(err, TillError::Import(_)));
    }
}
