//! Decorators layering one behavior each over an inner [`Recommender`].
//!
//! They hold the inner recommender by value and compose by nesting, so any
//! stack can be built without a fixed hierarchy:
//!
//! - [`EscalatingRecommender`]: an empty success becomes `NoCandidates`
//! - [`PersistingRecommender`]: served ids are appended to a history store
//! - [`RetryingRecommender`]: re-fetches the shortfall up to N times
//!
//! Intermediate stages (`filter`, `group_sort`, `post_sort`) pass straight
//! through to the inner recommender.
//!
//! [`Recommender`]: crate::Recommender

pub mod escalation;
pub mod persistence;
pub mod retry;

pub use escalation::EscalatingRecommender;
pub use persistence::PersistingRecommender;
pub use retry::RetryingRecommender;
