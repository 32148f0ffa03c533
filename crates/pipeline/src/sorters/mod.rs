//! Sorter implementations.
//!
//! Each sorter contributes one partition layer to the grouping pass.

pub mod preferred;
pub mod tier;

pub use preferred::PreferredSorter;
pub use tier::TierSorter;
