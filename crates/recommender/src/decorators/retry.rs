//! Re-fetch until a quota is met.
//!
//! ## Algorithm
//! 1. Ask the inner recommender for the current shortfall
//!    (`size - accumulated`)
//! 2. Append whatever comes back; no deduplication across attempts
//! 3. Stop once the accumulator reaches `size` or after `retry_count`
//!    attempts
//!
//! The last batch is not truncated, so the result can overshoot `size` when
//! the inner recommender returns more than it was asked for. The first
//! inner error aborts the call and everything accumulated so far is
//! discarded.

use history::CandidateId;
use tracing::{debug, warn};

use crate::error::Result;
use crate::recommender::Recommender;

pub struct RetryingRecommender<R> {
    inner: R,
    retry_count: usize,
}

impl<R: Recommender> RetryingRecommender<R> {
    /// At most `retry_count` inner fetches per call.
    pub fn new(inner: R, retry_count: usize) -> Self {
        Self { inner, retry_count }
    }

    pub fn retry_count(&self) -> usize {
        self.retry_count
    }
}

impl<R: Recommender> Recommender for RetryingRecommender<R> {
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
        let mut accumulated: Vec<CandidateId> = Vec::new();
        if size == 0 {
            return Ok(accumulated);
        }

        for attempt in 1..=self.retry_count {
            let shortfall = size - accumulated.len();
            let fetched = match self.inner.fetch(shortfall) {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(
                        "Attempt {} of {} failed, discarding {} accumulated candidates: {}",
                        attempt,
                        self.retry_count,
                        accumulated.len(),
                        e
                    );
                    return Err(e);
                }
            };
            debug!(
                "Attempt {} asked for {}, got {}",
                attempt,
                shortfall,
                fetched.len()
            );
            accumulated.extend(fetched);

            if accumulated.len() >= size {
                break;
            }
        }

        Ok(accumulated)
    }
}
