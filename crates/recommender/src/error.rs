//! Error taxonomy for recommender stacks.
//!
//! Callers usually care about which *class* of failure happened, not which
//! collaborator raised it:
//!
//! - a collaborator failed (recall, filter rule, sorter): retrying later or
//!   falling back to another stack may help
//! - the result was empty and a decorator escalated that: nothing to show
//! - the result was fine but recording it failed: the candidates are still
//!   usable and are carried in the error
//!
//! [`RecommendError::kind`] exposes that classification.

use history::{CandidateId, HistoryError};
use pipeline::RuleFailure;
use thiserror::Error;

/// Coarse failure class of a [`RecommendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Collaborator,
    EscalatedEmpty,
    Persistence,
}

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The recall source failed
    #[error("recall from {recaller} failed: {source}")]
    Recall {
        recaller: String,
        #[source]
        source: anyhow::Error,
    },

    /// A filter rule failed; later rules did not run
    #[error("filter rule {rule} failed: {source}")]
    Filter {
        rule: String,
        #[source]
        source: anyhow::Error,
    },

    /// A sorter could not produce its predicate set
    #[error("sorter {sorter} failed: {source}")]
    Sort {
        sorter: String,
        #[source]
        source: anyhow::Error,
    },

    /// The stack produced nothing and the caller requires a non-empty answer
    #[error("no candidates available")]
    NoCandidates,

    /// The fetch succeeded but the served history could not be written
    ///
    /// `served` holds the fetched candidates so callers may still use them.
    #[error("recording served candidates under {key} failed: {source}")]
    Persistence {
        key: String,
        served: Vec<CandidateId>,
        #[source]
        source: HistoryError,
    },
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecommendError::Recall { .. }
            | RecommendError::Filter { .. }
            | RecommendError::Sort { .. } => ErrorKind::Collaborator,
            RecommendError::NoCandidates => ErrorKind::EscalatedEmpty,
            RecommendError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    /// Candidates that were produced before the failure, if any survive it.
    pub fn served(&self) -> Option<&[CandidateId]> {
        match self {
            RecommendError::Persistence { served, .. } => Some(served),
            _ => None,
        }
    }
}

impl From<RuleFailure> for RecommendError {
    fn from(failure: RuleFailure) -> Self {
        RecommendError::Filter {
            rule: failure.rule,
            source: failure.source,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
