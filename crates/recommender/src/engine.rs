//! # Pipeline Engine
//!
//! This module coordinates the base recommendation pipeline:
//! 1. Recall the raw candidate pool
//! 2. Shuffle it, so recall order never leaks into tie-breaks
//! 3. Apply the filter chain
//! 4. Group by the sorters' predicate sets (hierarchical partition)
//! 5. Shuffle inside each group, keeping group order
//! 6. Flatten
//! 7. Group again by the post-sorters' predicate sets (no shuffle)
//! 8. Flatten
//! 9. Truncate to the requested size
//!
//! An empty pool after recall or filtering is a normal outcome: `fetch`
//! returns `Ok(vec![])`. Any collaborator failure aborts the whole fetch.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use history::{CandidateId, UserId};
use pipeline::grouping::{flatten, partition};
use pipeline::{FilterChain, FilterRule, NamedPredicateSet, Sorter};
use sources::Recaller;

use crate::error::{RecommendError, Result};
use crate::recommender::Recommender;

/// The innermost layer of every recommender stack.
///
/// Configuration is fixed once built. The shuffle RNG is injected (or
/// seeded from the OS) and sits behind a mutex, so one engine can serve
/// concurrent callers as long as its collaborators are thread-safe.
pub struct PipelineEngine {
    user_id: UserId,
    recaller: Box<dyn Recaller>,
    filters: FilterChain,
    sorters: Vec<Box<dyn Sorter>>,
    post_sorters: Vec<Box<dyn Sorter>>,
    rng: Mutex<StdRng>,
}

impl PipelineEngine {
    /// Create an engine for `user_id` with no rules and no sorters.
    pub fn new(user_id: UserId, recaller: impl Recaller + 'static) -> Self {
        Self::from_boxed(user_id, Box::new(recaller))
    }

    pub fn from_boxed(user_id: UserId, recaller: Box<dyn Recaller>) -> Self {
        Self {
            user_id,
            recaller,
            filters: FilterChain::new(),
            sorters: Vec::new(),
            post_sorters: Vec::new(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Append a filter rule (builder pattern).
    pub fn with_filter_rule(mut self, rule: impl FilterRule + 'static) -> Self {
        self.filters = self.filters.add_rule(rule);
        self
    }

    /// Append a primary grouping layer.
    pub fn with_sorter(mut self, sorter: impl Sorter + 'static) -> Self {
        self.sorters.push(Box::new(sorter));
        self
    }

    /// Append a post-processing grouping layer.
    pub fn with_post_sorter(mut self, sorter: impl Sorter + 'static) -> Self {
        self.post_sorters.push(Box::new(sorter));
        self
    }

    /// Make every shuffle reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    fn shuffle(&self, items: &mut [CandidateId]) {
        // A panic elsewhere cannot leave the RNG in a bad state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.shuffle(&mut *rng);
    }

    /// Ask every sorter for its layer, all seeing the same candidate list.
    fn predicate_sets(
        sorters: &[Box<dyn Sorter>],
        candidates: &[CandidateId],
    ) -> Result<Vec<NamedPredicateSet>> {
        sorters
            .iter()
            .map(|sorter| {
                sorter.sort(candidates).map_err(|source| RecommendError::Sort {
                    sorter: sorter.name().to_string(),
                    source,
                })
            })
            .collect()
    }
}

impl Recommender for PipelineEngine {
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        Ok(self.filters.apply(self.user_id, candidates)?)
    }

    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        let sets = Self::predicate_sets(&self.sorters, candidates)?;
        Ok(partition(candidates, &sets))
    }

    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        let sets = Self::predicate_sets(&self.post_sorters, candidates)?;
        Ok(partition(candidates, &sets))
    }

    #[instrument(skip(self), fields(user_id = self.user_id))]
    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let start_time = Instant::now();

        let mut candidates = self
            .recaller
            .recall()
            .map_err(|source| RecommendError::Recall {
                recaller: self.recaller.name().to_string(),
                source,
            })?;
        debug!("Recalled {} candidates from {}", candidates.len(), self.recaller.name());
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        self.shuffle(&mut candidates);

        let filtered = self.filter(candidates)?;
        debug!("Filtering complete, {} candidates remain", filtered.len());
        if filtered.is_empty() {
            return Ok(Vec::new());
        }

        let mut groups = self.group_sort(&filtered)?;
        for group in &mut groups {
            self.shuffle(group);
        }
        debug!("Grouped into {} tiers", groups.len());
        let flat = flatten(groups);

        let post_groups = self.post_sort(&flat)?;
        debug!("Post-grouped into {} tiers", post_groups.len());
        let mut flat = flatten(post_groups);

        flat.truncate(size);
        info!(
            "Fetched {} of {} requested candidates for user {} in {:.2?}",
            flat.len(),
            size,
            self.user_id,
            start_time.elapsed()
        );
        Ok(flat)
    }
}
