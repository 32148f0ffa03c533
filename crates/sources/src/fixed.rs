//! Fixed Source - a static candidate pool

use anyhow::Result;
use history::CandidateId;
use tracing::debug;

use crate::Recaller;

/// Recalls the same list every time.
#[derive(Debug, Clone)]
pub struct FixedRecaller {
    name: String,
    candidates: Vec<CandidateId>,
}

impl FixedRecaller {
    pub fn new(name: impl Into<String>, candidates: Vec<CandidateId>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }
}

impl Recaller for FixedRecaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn recall(&self) -> Result<Vec<CandidateId>> {
        debug!("Recalled {} candidates from {}", self.candidates.len(), self.name);
        // Callers shuffle in place, so never hand out the stored list
        Ok(self.candidates.clone())
    }
}
