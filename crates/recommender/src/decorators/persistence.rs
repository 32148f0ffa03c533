//! Record served candidates to a history store.
//!
//! ## Algorithm
//! 1. Fetch from the inner recommender; errors pass through untouched
//! 2. Empty results are returned without touching the store
//! 3. Every returned id is appended under the memory key, scored by the
//!    current epoch second
//! 4. If the append fails the fetched ids ride along inside
//!    `RecommendError::Persistence`, so the caller can still serve them
//!
//! The decorator only writes. Excluding previously served ids is the job of
//! a filter rule reading the same store (`AlreadyServedFilter`).

use std::sync::Arc;

use chrono::Utc;
use history::{CandidateId, HistoryStore, ServedEntry, DEFAULT_MEMORY_KEY};
use tracing::{debug, warn};

use crate::error::{RecommendError, Result};
use crate::recommender::Recommender;

pub struct PersistingRecommender<R> {
    inner: R,
    store: Arc<dyn HistoryStore>,
    memory_key: String,
}

impl<R: Recommender> PersistingRecommender<R> {
    /// Wrap `inner`, recording under [`DEFAULT_MEMORY_KEY`].
    pub fn new(inner: R, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            inner,
            store,
            memory_key: DEFAULT_MEMORY_KEY.to_string(),
        }
    }

    /// Record under a different key (e.g. one per user).
    pub fn with_memory_key(mut self, key: impl Into<String>) -> Self {
        self.memory_key = key.into();
        self
    }

    pub fn memory_key(&self) -> &str {
        &self.memory_key
    }
}

impl<R: Recommender> Recommender for PersistingRecommender<R> {
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        self.inner.filter(candidates)
    }

    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        self.inner.group_sort(candidates)
    }

    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        self.inner.post_sort(candidates)
    }

    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>> {
        let fetched = self.inner.fetch(size)?;
        if fetched.is_empty() {
            return Ok(fetched);
        }

        let served_at = Utc::now().timestamp() as f64;
        let entries: Vec<ServedEntry> = fetched
            .iter()
            .map(|&member| ServedEntry::new(member, served_at))
            .collect();

        if let Err(source) = self.store.append_batch(&self.memory_key, &entries) {
            warn!(
                "Failed to record {} served candidates in {} store: {}",
                fetched.len(),
                self.store.name(),
                source
            );
            return Err(RecommendError::Persistence {
                key: self.memory_key.clone(),
                served: fetched,
                source,
            });
        }

        debug!(
            "Recorded {} served candidates under {}",
            fetched.len(),
            self.memory_key
        );
        Ok(fetched)
    }
}
