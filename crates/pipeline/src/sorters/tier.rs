//! Fixed tiers declared up front.

use anyhow::Result;
use history::CandidateId;

use crate::predicate::{NamedPredicateSet, Predicate};
use crate::traits::Sorter;

/// A sorter whose tiers do not depend on the candidate list.
///
/// ## Usage
/// ```ignore
/// let sorter = TierSorter::new("BiggerGroup")
///     .tier("above_100", |id| *id > 100)
///     .tier("below_50", |id| *id > 0 && *id < 50)
///     .tier("negative", |id| *id < 0);
/// ```
///
/// Candidates matching no tier are dropped by the partition. Call
/// [`TierSorter::catch_all`] last to keep them in a lowest-priority tier.
#[derive(Debug, Clone)]
pub struct TierSorter {
    set: NamedPredicateSet,
}

impl TierSorter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            set: NamedPredicateSet::new(name),
        }
    }

    /// Append a tier below the existing ones.
    pub fn tier(
        mut self,
        name: impl Into<String>,
        test: impl Fn(&CandidateId) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.set.push(Predicate::new(name, test));
        self
    }

    /// Append an always-true tier so nothing is dropped by this layer.
    pub fn catch_all(mut self) -> Self {
        self.set.push(Predicate::always("rest"));
        self
    }

    pub fn tier_count(&self) -> usize {
        self.set.len()
    }
}

impl Sorter for TierSorter {
    fn name(&self) -> &str {
        &self.set.name
    }

    fn sort(&self, _candidates: &[CandidateId]) -> Result<NamedPredicateSet> {
        Ok(self.set.clone())
    }
}
