//! Credential store and per-user record logs.
//!
//! Both stores are flat CSV files reloaded in full on every read; there is
//! no caching, so a read always sees the latest snapshot on disk. Writes
//! are open-append-close with no locking.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::{AnalysisRecord, RECORD_HEADER};

const HISTORY_TAIL: usize = 20;

/// Repository seam between the handlers and the backing store. Production
/// uses [`CsvStorage`]; tests inject an in-memory backend.
pub trait Storage: Send + Sync {
    /// Full credential snapshot. Rows without exactly two fields are
    /// skipped; a missing file yields an empty map; for duplicate
    /// usernames the last row wins.
    fn read_users(&self) -> AppResult<HashMap<String, String>>;

    /// Appends one credential row. Performs no existence check; the
    /// signup handler is responsible for rejecting duplicates.
    fn save_user(&self, username: &str, password: &str) -> AppResult<()>;

    /// Appends one record to the user's log, writing the header first if
    /// the log does not exist yet.
    fn append_record(&self, username: &str, record: &AnalysisRecord) -> AppResult<()>;

    /// Last 20 raw rows of the user's log, header included when it falls
    /// inside the tail. A missing log means no records, not an error.
    fn read_history(&self, username: &str) -> AppResult<Vec<Vec<String>>>;
}

pub type SharedStorage = Arc<dyn Storage>;

/// File-backed storage rooted at a data directory: `users.csv` for
/// credentials, `<username>_records.csv` per user.
pub struct CsvStorage {
    data_dir: PathBuf,
}

impl CsvStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.csv")
    }

    fn records_path(&self, username: &str) -> PathBuf {
        self.data_dir.join(format!("{}_records.csv", username))
    }
}

fn read_rows(path: &Path) -> AppResult<Vec<Vec<String>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect())
}

fn append_row(path: &Path, row: &[String]) -> AppResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", row.join(","))?;
    Ok(())
}

impl Storage for CsvStorage {
    fn read_users(&self) -> AppResult<HashMap<String, String>> {
        let mut users = HashMap::new();
        for row in read_rows(&self.users_path())? {
            if let [username, password] = row.as_slice() {
                users.insert(username.clone(), password.clone());
            } else {
                tracing::debug!("Skipping malformed credential row with {} fields", row.len());
            }
        }
        Ok(users)
    }

    fn save_user(&self, username: &str, password: &str) -> AppResult<()> {
        append_row(
            &self.users_path(),
            &[username.to_string(), password.to_string()],
        )
    }

    fn append_record(&self, username: &str, record: &AnalysisRecord) -> AppResult<()> {
        let path = self.records_path(username);
        if !path.exists() {
            let header: Vec<String> = RECORD_HEADER.iter().map(|s| s.to_string()).collect();
            append_row(&path, &header)?;
        }
        append_row(&path, &record.to_row())
    }

    fn read_history(&self, username: &str) -> AppResult<Vec<Vec<String>>> {
        let rows = read_rows(&self.records_path(username))?;
        let start = rows.len().saturating_sub(HISTORY_TAIL);
        Ok(rows[start..].to_vec())
    }
}

/// In-memory backend for tests, mirroring the append-only file semantics.
#[cfg(test)]
pub struct MemoryStorage {
    users: std::sync::Mutex<Vec<(String, String)>>,
    records: std::sync::Mutex<HashMap<String, Vec<Vec<String>>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
            records: std::sync::Mutex::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read_users(&self) -> AppResult<HashMap<String, String>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().cloned().collect())
    }

    fn save_user(&self, username: &str, password: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        users.push((username.to_string(), password.to_string()));
        Ok(())
    }

    fn append_record(&self, username: &str, record: &AnalysisRecord) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        let rows = records.entry(username.to_string()).or_insert_with(|| {
            vec![RECORD_HEADER.iter().map(|s| s.to_string()).collect()]
        });
        rows.push(record.to_row());
        Ok(())
    }

    fn read_history(&self, username: &str) -> AppResult<Vec<Vec<String>>> {
        let records = self.records.lock().unwrap();
        let rows = records.get(username).cloned().unwrap_or_default();
        let start = rows.len().saturating_sub(HISTORY_TAIL);
        Ok(rows[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water_quality::estimate_minerals;
    use tempfile::tempdir;

    fn sample_record(ph: f64, tds: f64) -> AnalysisRecord {
        let minerals = estimate_minerals(tds, "urban");
        let (label, _) = crate::water_quality::analyze_water(ph, tds);
        AnalysisRecord::new(ph, tds, minerals, label)
    }

    #[test]
    fn test_read_users_missing_file() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());
        assert!(storage.read_users().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_read_users() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        storage.save_user("alice", "secret").unwrap();
        storage.save_user("bob", "hunter2").unwrap();

        let users = storage.read_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.get("alice").map(String::as_str), Some("secret"));
        assert_eq!(users.get("bob").map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn test_duplicate_username_last_row_wins() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        storage.save_user("alice", "first").unwrap();
        storage.save_user("alice", "second").unwrap();

        let users = storage.read_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users.get("alice").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_malformed_credential_rows_skipped() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("users.csv"),
            "alice,secret\njunk\nbob,pw,extra\ncarol,letmein\n",
        )
        .unwrap();

        let storage = CsvStorage::new(dir.path());
        let users = storage.read_users().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.contains_key("alice"));
        assert!(users.contains_key("carol"));
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        storage.append_record("alice", &sample_record(7.0, 400.0)).unwrap();
        storage.append_record("alice", &sample_record(7.2, 600.0)).unwrap();

        let rows = storage.read_history("alice").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RECORD_HEADER.map(String::from).to_vec());
        assert_ne!(rows[1][0], "DateTime");
        assert_ne!(rows[2][0], "DateTime");
    }

    #[test]
    fn test_record_column_order() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        // urban fractions at tds 1000: ca 200, mg 60, na 180, k 20, so4 220, cl 200
        storage.append_record("alice", &sample_record(7.0, 1000.0)).unwrap();

        let rows = storage.read_history("alice").unwrap();
        let row = &rows[1];
        assert_eq!(row[1], "7");
        assert_eq!(row[2], "1000");
        assert_eq!(row[3], "200"); // Calcium
        assert_eq!(row[4], "60"); // Magnesium
        assert_eq!(row[5], "20"); // Potassium
        assert_eq!(row[6], "180"); // Sodium
        assert_eq!(row[7], "220"); // Sulphate
        assert_eq!(row[8], "200"); // Chloride
        assert_eq!(row[9], "Poor - Unsafe");
    }

    #[test]
    fn test_history_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());
        assert!(storage.read_history("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_history_tail_is_last_20_rows() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        for i in 0..25 {
            storage
                .append_record("alice", &sample_record(7.0, 100.0 + i as f64))
                .unwrap();
        }

        let rows = storage.read_history("alice").unwrap();
        assert_eq!(rows.len(), 20);
        // 26 rows on disk (header + 25); the header is outside the tail
        assert_ne!(rows[0][0], "DateTime");
        assert_eq!(rows[19][2], "124");
    }

    #[test]
    fn test_record_logs_are_per_user() {
        let dir = tempdir().unwrap();
        let storage = CsvStorage::new(dir.path());

        storage.append_record("alice", &sample_record(7.0, 400.0)).unwrap();

        assert_eq!(storage.read_history("alice").unwrap().len(), 2);
        assert!(storage.read_history("bob").unwrap().is_empty());
    }
}
