//! Filter to remove candidates the user has already been served.
//!
//! Reads the same history the persistence decorator writes, so wiring both
//! against one store turns "remember what we served" into "do not serve it
//! again". Place it early in the chain: there is no point grouping
//! candidates that will be thrown away.

use std::collections::HashSet;
use std::sync::Arc;

use crate::traits::FilterRule;
use anyhow::{Context, Result};
use history::{CandidateId, HistoryStore, UserId};

/// Removes candidates recorded under `key` in a history store.
///
/// A store read failure is a rule failure: the chain aborts rather than
/// risk re-serving.
pub struct AlreadyServedFilter {
    store: Arc<dyn HistoryStore>,
    key: String,
}

impl AlreadyServedFilter {
    pub fn new(store: Arc<dyn HistoryStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl FilterRule for AlreadyServedFilter {
    fn name(&self) -> &str {
        "AlreadyServedFilter"
    }

    fn apply(&self, _user_id: UserId, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        let served: HashSet<CandidateId> = self
            .store
            .served(&self.key)
            .with_context(|| format!("reading served history under {}", self.key))?
            .into_iter()
            .map(|entry| entry.member)
            .collect();

        let filtered: Vec<CandidateId> = candidates
            .into_iter()
            .filter(|id| !served.contains(id))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use history::{HistoryError, InMemoryHistoryStore, ServedEntry};

    struct UnavailableStore;

    impl HistoryStore for UnavailableStore {
        fn name(&self) -> &str {
            "unavailable"
        }

        fn append(&self, _key: &str, _member: CandidateId, _score: f64) -> history::Result<()> {
            Err(HistoryError::Unavailable("offline".to_string()))
        }

        fn served(&self, _key: &str) -> history::Result<Vec<ServedEntry>> {
            Err(HistoryError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_already_served_filter() {
        let store = Arc::new(InMemoryHistoryStore::new());
        store.append("served", 100, 1.0).unwrap();
        store.append("served", 200, 2.0).unwrap();
        store.append("elsewhere", 300, 3.0).unwrap();

        let filter = AlreadyServedFilter::new(store, "served");
        let filtered = filter.apply(1, vec![100, 101, 200, 300]).unwrap();

        assert_eq!(filtered, vec![101, 300]);
    }

    #[test]
    fn test_store_failure_is_rule_failure() {
        let filter = AlreadyServedFilter::new(Arc::new(UnavailableStore), "served");
        let err = filter.apply(1, vec![1]).unwrap_err();
        assert!(format!("{:#}", err).contains("offline"));
    }
}
