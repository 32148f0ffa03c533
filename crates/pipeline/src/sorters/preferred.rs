//! Promote a fixed set of candidates ahead of everything else.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use history::CandidateId;

use crate::predicate::NamedPredicateSet;
use crate::traits::Sorter;

/// Two tiers: preferred ids first, everything else after.
///
/// Never drops a candidate, which makes it a safe post-sorter for boosting
/// (e.g. editorial picks) without changing what gets served.
pub struct PreferredSorter {
    name: String,
    preferred: Arc<HashSet<CandidateId>>,
}

impl PreferredSorter {
    pub fn new(name: impl Into<String>, preferred: impl IntoIterator<Item = CandidateId>) -> Self {
        Self {
            name: name.into(),
            preferred: Arc::new(preferred.into_iter().collect()),
        }
    }
}

impl Sorter for PreferredSorter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort(&self, _candidates: &[CandidateId]) -> Result<NamedPredicateSet> {
        let preferred = Arc::clone(&self.preferred);
        Ok(NamedPredicateSet::new(self.name.clone())
            .with("preferred", move |id: &CandidateId| preferred.contains(id))
            .with("rest", |_: &CandidateId| true))
    }
}
