//! Scripted recommender used by the decorator tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use history::CandidateId;

use crate::error::{RecommendError, Result};
use crate::recommender::Recommender;

/// Replays a fixed sequence of fetch outcomes and records requested sizes.
///
/// Once the script runs out every further fetch returns `Ok(vec![])`.
pub(crate) struct ScriptedRecommender {
    script: Mutex<VecDeque<Result<Vec<CandidateId>>>>,
    requests: Mutex<Vec<usize>>,
}

impl ScriptedRecommender {
    pub(crate) fn new(script: Vec<Result<Vec<CandidateId>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always returns the same batch.
    pub(crate) fn repeating(batch: Vec<CandidateId>, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(batch.clone())).collect())
    }

    pub(crate) fn requests(&self) -> Vec<usize> {
        self.requests.lock().unwrap().clone()
    }
}

impl Recommender for ScriptedRecommender {
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        Ok(candidates)
    }

    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        Ok(vec![candidates.to_vec()])
    }

    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        Ok(vec![candidates.to_vec()])
    }

    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>> {
        self.requests.lock().unwrap().push(size);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub(crate) fn collaborator_error(message: &str) -> RecommendError {
    RecommendError::Recall {
        recaller: "scripted".to_string(),
        source: anyhow::anyhow!(message.to_string()),
    }
}
