//! Filtering and hierarchical grouping of recalled candidates.
//!
//! This crate provides:
//! - `FilterRule` and `Sorter` traits for pluggable business logic
//! - `FilterChain` for composing filter rules with short-circuit on empty
//! - `Predicate` / `NamedPredicateSet` for declaring priority tiers
//! - `grouping::partition`, the hierarchical tier partition
//!
//! ## Architecture
//! Candidates pass through the stages in order:
//! 1. The filter chain removes candidates the user must not see
//! 2. Each sorter contributes one predicate set (one partition layer)
//! 3. `partition` splits the survivors into ordered, disjoint tiers
//!
//! Partitioning is lossy: a candidate matching no predicate in a layer is
//! dropped. Add an always-true final tier (`TierSorter::catch_all`) to keep
//! everything.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterChain, grouping};
//! use pipeline::filters::{Parity, ParityFilter};
//! use pipeline::sorters::TierSorter;
//!
//! let chain = FilterChain::new().add_rule(ParityFilter::new(Parity::Odd));
//! let filtered = chain.apply(user_id, candidates)?;
//!
//! let sorter = TierSorter::new("BiggerGroup")
//!     .tier("above_100", |id| *id > 100)
//!     .tier("below_50", |id| *id > 0 && *id < 50);
//! let tiers = grouping::partition(&filtered, &[sorter.sort(&filtered)?]);
//! ```

pub mod traits;
pub mod predicate;
pub mod grouping;
pub mod filter_chain;
pub mod filters;
pub mod sorters;

// Re-export main types
pub use filter_chain::{FilterChain, RuleFailure};
pub use predicate::{NamedPredicateSet, Predicate};
pub use traits::{FilterRule, Sorter};
