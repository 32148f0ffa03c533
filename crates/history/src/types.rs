//! Core identifiers and the served-history record.

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

// =============================================================================
// Type Aliases
// =============================================================================
// Candidate and user ids are both plain i64 on the wire; the aliases keep
// signatures readable and stop the two from being mixed up in review.

/// Opaque identifier of a recommendable entity.
///
/// No internal structure is interpreted anywhere in the pipeline.
pub type CandidateId = i64;

/// Identifier of the user a pipeline is built for.
pub type UserId = i64;

/// Key the persistence decorator writes under unless told otherwise.
pub const DEFAULT_MEMORY_KEY: &str = "recommender:memory";

/// One served candidate, scored by the epoch second it was handed out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServedEntry {
    pub member: CandidateId,
    pub score: f64,
}

impl ServedEntry {
    pub fn new(member: CandidateId, score: f64) -> Self {
        Self { member, score }
    }
}

/// Orders entries the way a sorted set would: ascending score, ties broken
/// by member so output is stable.
pub(crate) fn sort_entries(entries: &mut [ServedEntry]) {
    entries.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.member.cmp(&b.member)));
}

/// Stores only accept finite scores; NaN and infinities have no JSON form
/// and no meaningful position in a sorted set.
pub(crate) fn check_scores(entries: &[ServedEntry]) -> Result<()> {
    match entries.iter().find(|entry| !entry.score.is_finite()) {
        Some(entry) => Err(HistoryError::InvalidScore {
            member: entry.member,
            score: entry.score,
        }),
        None => Ok(()),
    }
}
