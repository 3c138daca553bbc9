//! Persistent storage for request history.
//!
//! Records are appended to a JSONL (JSON Lines) file, one record per line, so
//! a partially written or corrupted line only loses that record.

use super::models::{HistoricalHttpRequest, HistoryError};
use super::HistoryStore;
use crate::config::RestClientConfig;
use async_trait::async_trait;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Gets the default history file path.
///
/// Returns `~/.config/rest-runner/history.jsonl` on Unix-like systems, or the
/// equivalent under `%USERPROFILE%\AppData\Roaming` on Windows.
pub fn default_history_path() -> Result<PathBuf, HistoryError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(HistoryError::StorageError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )));
    };

    Ok(config_dir.join("rest-runner").join("history.jsonl"))
}

/// History stored as a JSON Lines file, capped at `limit` records.
///
/// Clones share one write lock, so appends from several threads never
/// interleave with the rewrite that enforces the limit.
#[derive(Debug, Clone)]
pub struct JsonlHistoryStore {
    path: PathBuf,
    limit: usize,
    write_lock: Arc<Mutex<()>>,
}

impl JsonlHistoryStore {
    /// Creates a store writing to `path` and keeping at most `limit` records.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store at the default location using `historyLimit`.
    pub fn from_config(config: &RestClientConfig) -> Result<Self, HistoryError> {
        Ok(Self::new(default_history_path()?, config.history_limit))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record, then drops the oldest records beyond the limit.
    pub fn append(&self, record: &HistoricalHttpRequest) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        file.flush()?;
        drop(file);

        self.enforce_limit()?;
        Ok(())
    }

    /// Loads every readable record, oldest first.
    ///
    /// Corrupted lines are skipped with a warning. A missing file is an empty
    /// history.
    pub fn load(&self) -> Result<Vec<HistoricalHttpRequest>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<HistoricalHttpRequest>(&line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "Skipping corrupted history entry at line {}: {}",
                    line_num + 1,
                    e
                ),
            }
        }

        Ok(records)
    }

    /// Rewrites the file keeping only the newest `limit` records.
    ///
    /// # Returns
    ///
    /// The number of records removed.
    pub fn enforce_limit(&self) -> Result<usize, HistoryError> {
        let records = self.load()?;
        if records.len() <= self.limit {
            return Ok(0);
        }

        let removed = records.len() - self.limit;
        let temp_path = self.path.with_extension("jsonl.tmp");
        let mut temp_file = File::create(&temp_path)?;
        for record in &records[removed..] {
            writeln!(temp_file, "{}", serde_json::to_string(record)?)?;
        }
        temp_file.flush()?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path)?;
        Ok(removed)
    }
}

/// File I/O runs on the blocking pool when a tokio runtime is available, so
/// the current-thread runtime of the command-line driver keeps polling.
#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    #[cfg(feature = "native")]
    async fn add_to_history(&self, record: HistoricalHttpRequest) -> Result<(), HistoryError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.append(&record))
            .await
            .map_err(|e| HistoryError::StorageError(std::io::Error::other(e)))?
    }

    #[cfg(not(feature = "native"))]
    async fn add_to_history(&self, record: HistoricalHttpRequest) -> Result<(), HistoryError> {
        self.append(&record)
    }
}
