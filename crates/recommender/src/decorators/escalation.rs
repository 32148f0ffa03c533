//! Turn "nothing to recommend" into a hard failure.

use history::CandidateId;
use tracing::warn;

use crate::error::{RecommendError, Result};
use crate::recommender::Recommender;

/// Fails with [`RecommendError::NoCandidates`] when the inner fetch succeeds
/// with an empty result. Errors and non-empty results pass through.
///
/// For callers that must always get something to show. Put it outside a
/// [`RetryingRecommender`](crate::RetryingRecommender) so shortfalls are
/// retried before escalating.
pub struct EscalatingRecommender<R> {
    inner: R,
}

impl<R: Recommender> EscalatingRecommender<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Recommender> Recommender for EscalatingRecommender<R> {
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
            warn!("Fetch of {} produced no candidates, escalating", size);
            return Err(RecommendError::NoCandidates);
        }
        Ok(fetched)
    }
}
