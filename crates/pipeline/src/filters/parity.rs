//! Keep only odd or only even candidate ids.

use crate::traits::FilterRule;
use anyhow::Result;
use history::{CandidateId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn matches(self, id: CandidateId) -> bool {
        // rem_euclid so negative odd ids count as odd
        let odd = id.rem_euclid(2) == 1;
        match self {
            Parity::Odd => odd,
            Parity::Even => !odd,
        }
    }
}

/// Removes candidates whose id has the wrong parity.
pub struct ParityFilter {
    keep: Parity,
}

impl ParityFilter {
    pub fn new(keep: Parity) -> Self {
        Self { keep }
    }
}

impl FilterRule for ParityFilter {
    fn name(&self) -> &str {
        match self.keep {
            Parity::Odd => "OddIdFilter",
            Parity::Even => "EvenIdFilter",
        }
    }

    fn apply(&self, _user_id: UserId, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        let filtered: Vec<CandidateId> = candidates
            .into_iter()
            .filter(|&id| self.keep.matches(id))
            .collect();
        Ok(filtered)
    }
}
