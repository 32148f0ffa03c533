//! Error types for the history crate.
//!
//! Every store implementation reports failures through [`HistoryError`], so
//! callers above the store (the persistence decorator, the already-served
//! filter) can treat "history is unavailable" as one failure class no matter
//! which backend is wired in.

use thiserror::Error;

use crate::types::CandidateId;

/// Errors that can occur while writing or reading served history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The backing file could not be opened, written or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored line could not be decoded
    ///
    /// Carries the 1-based line number so a damaged history file can be
    /// repaired by hand.
    #[error("Corrupt history record at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// A score that cannot be stored or ordered (NaN or infinite)
    #[error("Invalid score {score} for member {member}")]
    InvalidScore { member: CandidateId, score: f64 },

    /// The store refused the operation (poisoned lock, remote outage, ...)
    #[error("History store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, HistoryError>;
