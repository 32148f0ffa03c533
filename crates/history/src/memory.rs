//! In-process history store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{HistoryError, Result};
use crate::store::HistoryStore;
use crate::types::{check_scores, sort_entries, CandidateId, ServedEntry};

/// History kept in a `HashMap<key, HashMap<member, score>>` behind a mutex.
///
/// Useful for tests and for single-process deployments where served history
/// does not need to survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<HashMap<String, HashMap<CandidateId, f64>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct members recorded under `key`.
    pub fn len(&self, key: &str) -> Result<usize> {
        let entries = self.lock()?;
        Ok(entries.get(key).map(|members| members.len()).unwrap_or(0))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, HashMap<CandidateId, f64>>>> {
        self.entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("in-memory history lock poisoned".to_string()))
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn append(&self, key: &str, member: CandidateId, score: f64) -> Result<()> {
        check_scores(&[ServedEntry::new(member, score)])?;
        let mut entries = self.lock()?;
        entries
            .entry(key.to_string())
            .or_default()
            .insert(member, score);
        Ok(())
    }

    fn append_batch(&self, key: &str, batch: &[ServedEntry]) -> Result<()> {
        check_scores(batch)?;
        // One lock for the whole batch so readers never see half of it
        let mut entries = self.lock()?;
        let members = entries.entry(key.to_string()).or_default();
        for entry in batch {
            members.insert(entry.member, entry.score);
        }
        Ok(())
    }

    fn served(&self, key: &str) -> Result<Vec<ServedEntry>> {
        let entries = self.lock()?;
        let mut served: Vec<ServedEntry> = entries
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .map(|(&member, &score)| ServedEntry::new(member, score))
                    .collect()
            })
            .unwrap_or_default();
        sort_entries(&mut served);
        Ok(served)
    }
}
