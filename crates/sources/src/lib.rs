//! # Sources Crate
//!
//! Recall: producing the raw, unfiltered candidate pool a recommender
//! starts from.
//!
//! ## Components
//!
//! ### Fixed Source
//! A static candidate list, handed out as a fresh copy on every call.
//! Handy for tests, demos and curated pools.
//!
//! ### Merged Source
//! Fans out to several recallers in order and merges their output,
//! keeping the first occurrence of every id.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{FixedRecaller, MergedRecaller, Recaller};
//!
//! let recaller = MergedRecaller::new()
//!     .add_source(FixedRecaller::new("editorial", vec![7, 11]))
//!     .add_source(FixedRecaller::new("trending", vec![11, 42]));
//!
//! let pool = recaller.recall()?; // [7, 11, 42]
//! ```

use anyhow::Result;
use history::CandidateId;

// Public modules
pub mod fixed;
pub mod merged;

// Re-export commonly used types
pub use fixed::FixedRecaller;
pub use merged::MergedRecaller;

/// The candidate source a recommender recalls from.
///
/// Order of the returned list carries no meaning: the recommender shuffles
/// it before any deterministic processing.
pub trait Recaller: Send + Sync {
    /// Returns the name of this source (for logging and error reports)
    fn name(&self) -> &str;

    fn recall(&self) -> Result<Vec<CandidateId>>;
}

impl<R: Recaller + ?Sized> Recaller for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recall(&self) -> Result<Vec<CandidateId>> {
        (**self).recall()
    }
}

impl<R: Recaller + ?Sized> Recaller for std::sync::Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recall(&self) -> Result<Vec<CandidateId>> {
        (**self).recall()
    }
}
