//! Core traits for the filtering and grouping stages.
//!
//! Concrete business rules live outside the recommender core; these traits
//! are the seam they plug into.

use anyhow::Result;
use history::{CandidateId, UserId};

use crate::predicate::NamedPredicateSet;

/// A filtering rule applied to the recalled candidates.
///
/// ## Design Note
/// - `Send + Sync` allows rules to be shared by a recommender used from
///   several threads
/// - Rules take ownership of the candidate list and return the survivors,
///   so they can filter in place without cloning
/// - A rule must never return more candidates than it was given
pub trait FilterRule: Send + Sync {
    /// Returns the name of this rule (for logging and error reports)
    fn name(&self) -> &str;

    /// Apply this rule to a set of candidates for `user_id`.
    ///
    /// # Returns
    /// * `Ok(Vec<CandidateId>)` - The surviving candidates (possibly empty)
    /// * `Err` - If the rule could not be evaluated
    fn apply(&self, user_id: UserId, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>>;
}

/// Produces the predicate set for one grouping layer.
///
/// The sorter sees the whole current candidate list, so tiers may depend on
/// the data (e.g. split at the median) as well as on fixed thresholds.
pub trait Sorter: Send + Sync {
    /// Returns the name of this sorter (for logging and error reports)
    fn name(&self) -> &str;

    fn sort(&self, candidates: &[CandidateId]) -> Result<NamedPredicateSet>;
}
