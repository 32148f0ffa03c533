//! The capability every layer of a stack exposes.

use std::sync::Arc;

use history::CandidateId;

use crate::error::Result;

/// A source of recommendations for one user.
///
/// `filter`, `group_sort` and `post_sort` expose the intermediate stages so
/// they can be exercised on their own; `fetch` runs the whole pipeline.
/// Decorators delegate the intermediate stages untouched and only layer
/// behavior over `fetch`.
pub trait Recommender: Send + Sync {
    /// Run the filter rules over `candidates`.
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>>;

    /// Primary grouping pass: one layer per configured sorter.
    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>>;

    /// Post-processing grouping pass over already flattened output.
    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>>;

    /// Fetch up to `size` recommendations.
    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>>;
}

impl<R: Recommender + ?Sized> Recommender for Box<R> {
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        (**self).filter(candidates)
    }

    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        (**self).group_sort(candidates)
    }

    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        (**self).post_sort(candidates)
    }

    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>> {
        (**self).fetch(size)
    }
}

impl<R: Recommender + ?Sized> Recommender for Arc<R> {
    fn filter(&self, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
        (**self).filter(candidates)
    }

    fn group_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        (**self).group_sort(candidates)
    }

    fn post_sort(&self, candidates: &[CandidateId]) -> Result<Vec<Vec<CandidateId>>> {
        (**self).post_sort(candidates)
    }

    fn fetch(&self, size: usize) -> Result<Vec<CandidateId>> {
        (**self).fetch(size)
    }
}
