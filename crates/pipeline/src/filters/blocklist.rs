//! Drop a fixed set of candidate ids.

use std::collections::HashSet;

use crate::traits::FilterRule;
use anyhow::Result;
use history::{CandidateId, UserId};

/// Removes candidates found in a fixed blocklist.
///
/// ## Algorithm
/// Uses a HashSet for O(1) lookups.
pub struct BlocklistFilter {
    blocked: HashSet<CandidateId>,
}

impl BlocklistFilter {
    pub fn new(blocked: impl IntoIterator<Item = CandidateId>) -> Self {
        Self {
            blocked: blocked.into_iter().collect(),
        }
    }
}

impl FilterRule for BlocklistFilter {
    fn name(&self) -> &str {
        "BlocklistFilter"
    }

    fn apply(&self, _user_id: UserId, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        let filtered: Vec<CandidateId> = candidates
            .into_iter()
            .filter(|id| !self.blocked.contains(id))
            .collect();
        Ok(filtered)
    }
}
