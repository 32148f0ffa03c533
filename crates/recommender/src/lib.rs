//! Recommender crate: the fetch pipeline and its decorators.
//!
//! A stack is one [`PipelineEngine`] wrapped in zero or more decorators.
//! Every layer implements [`Recommender`], so decorators nest freely:
//!
//! ```ignore
//! let engine = PipelineEngine::new(user_id, recaller)
//!     .with_filter_rule(ParityFilter::new(Parity::Odd))
//!     .with_sorter(tiers);
//!
//! let stack = PersistingRecommender::new(
//!     EscalatingRecommender::new(RetryingRecommender::new(engine, 3)),
//!     store,
//! );
//! let served = stack.fetch(20)?;
//! ```
//!
//! [`RecommendBuilder`] assembles the same stack from flags.

pub mod builder;
pub mod decorators;
pub mod engine;
pub mod error;
pub mod recommender;

#[cfg(test)]
mod testing;

pub use builder::RecommendBuilder;
pub use decorators::{EscalatingRecommender, PersistingRecommender, RetryingRecommender};
pub use engine::PipelineEngine;
pub use error::{ErrorKind, RecommendError, Result};
pub use recommender::Recommender;
