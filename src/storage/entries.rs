//! Entry repository for JSON storage
//!
//! Manages loading and saving daily entries to entries.json. Entries are
//! keyed by date, so an upsert for an existing day replaces it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{TillError, TillResult};
use crate::models::{Entry, Month};

use super::file_io::{read_json, write_json_atomic};

/// The persisted-record store the reporting engine reads from
///
/// `fetch_all` may return entries in any order; consumers sort and filter.
pub trait EntryStore {
    /// Every persisted entry
    fn fetch_all(&self) -> TillResult<Vec<Entry>>;

    /// Create or overwrite the entry for `entry.date`
    fn upsert(&self, entry: Entry) -> TillResult<()>;

    /// Remove the entry for a date, returning whether one existed
    fn delete_by_date(&self, date: NaiveDate) -> TillResult<bool>;
}

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    #[serde(default)]
    entries: Vec<Entry>,
}

/// Repository for entry persistence, indexed by date
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<NaiveDate, Entry>>,
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load entries from disk
    ///
    /// A file holding the same date twice keeps the later record.
    pub fn load(&self) -> TillResult<()> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for entry in file_data.entries {
            data.insert(entry.date, entry);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded entries");
        Ok(())
    }

    /// Save entries to disk, ascending by date
    pub fn save(&self) -> TillResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| TillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = EntryData {
            entries: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Save pending changes, or drop them if the write fails
    ///
    /// On a failed write the in-memory map is reloaded from disk so it keeps
    /// matching the file, and the write error is returned.
    pub fn commit(&self) -> TillResult<()> {
        self.save().map_err(|err| {
            tracing::warn!(error = %err, path = %self.path.display(), "save failed, reloading entries");
            if let Err(reload) = self.load() {
                tracing::warn!(error = %reload, "reload after failed save also failed");
            }
            err
        })
    }

    /// Get the entry recorded for a date
    pub fn get(&self, date: NaiveDate) -> TillResult<Option<Entry>> {
        let data = self
            .data
            .read()
            .map_err(|e| TillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&date).cloned())
    }

    /// Get all entries, ascending by date
    pub fn get_all(&self) -> TillResult<Vec<Entry>> {
        let data = self
            .data
            .read()
            .map_err(|e| TillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().cloned().collect())
    }

    /// Get the entries of one calendar month, ascending by date
    pub fn get_by_month(&self, month: Month) -> TillResult<Vec<Entry>> {
        let data = self
            .data
            .read()
            .map_err(|e| TillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .range(month.first_day()..=month.last_day())
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    /// Count entries
    pub fn count(&self) -> TillResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| TillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

impl EntryStore for EntryRepository {
    fn fetch_all(&self) -> TillResult<Vec<Entry>> {
        self.get_all()
    }

    fn upsert(&self, entry: Entry) -> TillResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(entry.date, entry);
        Ok(())
    }

    fn delete_by_date(&self, date: NaiveDate) -> TillResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&date).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryRepository::new(temp_dir.path().join("entries.json"));
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash_entry(date: NaiveDate, cents: i64) -> Entry {
        Entry::with_amounts(
            date,
            Money::from_cents(cents),
            Money::zero(),
            Money::zero(),
            Money::zero(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_overwrites_same_date() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(cash_entry(date(2024, 6, 3), 100)).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 3), 250)).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let stored = repo.get(date(2024, 6, 3)).unwrap().unwrap();
        assert_eq!(stored.cash.cents(), 250);
    }

    #[test]
    fn test_get_all_is_sorted() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(cash_entry(date(2024, 6, 10), 1)).unwrap();
        repo.upsert(cash_entry(date(2024, 5, 31), 2)).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 3), 3)).unwrap();

        let dates: Vec<_> = repo.get_all().unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 5, 31), date(2024, 6, 3), date(2024, 6, 10)]);
    }

    #[test]
    fn test_get_by_month() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(cash_entry(date(2024, 5, 31), 1)).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 1), 2)).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 30), 3)).unwrap();
        repo.upsert(cash_entry(date(2023, 6, 15), 4)).unwrap();

        let june = repo.get_by_month(Month::new(2024, 6).unwrap()).unwrap();
        assert_eq!(june.len(), 2);
        assert_eq!(june[0].date, date(2024, 6, 1));
        assert_eq!(june[1].date, date(2024, 6, 30));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.upsert(cash_entry(date(2024, 6, 3), 5000)).unwrap();
        repo.save().unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(date(2024, 6, 3)).unwrap().unwrap();
        assert_eq!(retrieved.cash.cents(), 5000);
    }

    #[test]
    fn test_load_coerces_corrupt_amounts() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("entries.json"),
            r#"{"entries": [
                {"date": "2024-06-03", "cash": "abc", "card": 5000, "cheque": null,
                 "created_at": "2024-06-03T18:00:00Z", "updated_at": "2024-06-03T18:00:00Z"},
                {"date": "2024-06-04", "cash": 12000, "expense": -300,
                 "created_at": "2024-06-04T18:00:00Z", "updated_at": "2024-06-04T18:00:00Z"},
                {"date": "2024-06-05", "cash": "45,50"}
            ]}"#,
        )
        .unwrap();

        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 3);

        let corrupt = repo.get(date(2024, 6, 3)).unwrap().unwrap();
        assert_eq!(corrupt.cash, Money::zero());
        assert_eq!(corrupt.card, Money::from_cents(5000));
        assert_eq!(corrupt.cheque, Money::zero());

        let valid = repo.get(date(2024, 6, 4)).unwrap().unwrap();
        assert_eq!(valid.cash, Money::from_cents(12000));
        assert_eq!(valid.expense, Money::from_cents(-300));

        let typed = repo.get(date(2024, 6, 5)).unwrap().unwrap();
        assert_eq!(typed.cash, Money::from_cents(4550));
    }

    #[test]
    fn test_failed_commit_discards_pending_changes() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(cash_entry(date(2024, 6, 3), 100)).unwrap();
        repo.commit().unwrap();

        // A directory where the temp file should go makes the write fail
        std::fs::create_dir(temp_dir.path().join("entries.json.tmp")).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 3), 999)).unwrap();
        repo.upsert(cash_entry(date(2024, 6, 4), 500)).unwrap();

        assert!(repo.commit().is_err());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(date(2024, 6, 3)).unwrap().unwrap().cash.cents(), 100);
    }

    #[test]
    fn test_delete_by_date() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(cash_entry(date(2024, 6, 3), 5000)).unwrap();
        assert!(repo.delete_by_date(date(2024, 6, 3)).unwrap());
        assert!(!repo.delete_by_date(date(2024, 6, 3)).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
