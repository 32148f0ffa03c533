//! Append-only JSON-lines history file.
//!
//! Each write adds one line per entry:
//!
//! ```text
//! {"key":"recommender:memory","member":101,"score":1700000000.0}
//! ```
//!
//! Reading replays the file in order, so the last line for a member wins.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::store::HistoryStore;
use crate::types::{check_scores, sort_entries, CandidateId, ServedEntry};

/// On-disk record layout.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRecord {
    key: String,
    member: CandidateId,
    score: f64,
}

/// History persisted to a JSON-lines file.
///
/// Writers in this process are serialized through a mutex so batches land
/// as contiguous lines.
#[derive(Debug)]
pub struct JsonlHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistoryStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_lines(&self, key: &str, entries: &[ServedEntry]) -> Result<()> {
        // serde_json would write these as null and fail to read them back
        check_scores(entries)?;
        let mut buffer = String::new();
        for entry in entries {
            let record = HistoryRecord {
                key: key.to_string(),
                member: entry.member,
                score: entry.score,
            };
            buffer.push_str(&serde_json::to_string(&record)?);
            buffer.push('\n');
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("history file lock poisoned".to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buffer.as_bytes())?;
        file.flush()?;

        debug!(
            "Appended {} history entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl HistoryStore for JsonlHistoryStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn append(&self, key: &str, member: CandidateId, score: f64) -> Result<()> {
        self.write_lines(key, &[ServedEntry::new(member, score)])
    }

    fn append_batch(&self, key: &str, entries: &[ServedEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.write_lines(key, entries)
    }

    fn served(&self, key: &str) -> Result<Vec<ServedEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // Nothing written yet
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut latest: HashMap<CandidateId, f64> = HashMap::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: HistoryRecord =
                serde_json::from_str(&line).map_err(|e| HistoryError::Corrupt {
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            if record.key == key {
                latest.insert(record.member, record.score);
            }
        }

        let mut served: Vec<ServedEntry> = latest
            .into_iter()
            .map(|(member, score)| ServedEntry::new(member, score))
            .collect();
        sort_entries(&mut served);
        Ok(served)
    }
}
