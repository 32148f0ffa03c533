//! Hierarchical predicate partition.
//!
//! ## Algorithm
//! 1. No predicate sets left: the input is one group (even when empty)
//! 2. Otherwise split the input by the first set: each item joins the tier
//!    of the first predicate it satisfies; items matching none are dropped
//! 3. Recurse into every non-empty tier with the remaining sets
//! 4. Concatenate the sub-results in tier order, skipping empty ones
//!
//! The output is an ordered list of disjoint groups; group 0 carries the
//! highest aggregate priority. Relative input order is kept inside each
//! group.

use crate::predicate::NamedPredicateSet;

/// Split `items` into one group per predicate of `set`.
///
/// Every group is returned, including empty ones, so index `i` always
/// corresponds to predicate `i`.
pub fn partition_exclusive<T: Clone>(items: &[T], set: &NamedPredicateSet<T>) -> Vec<Vec<T>> {
    let mut groups: Vec<Vec<T>> = vec![Vec::new(); set.len()];
    for item in items {
        if let Some(tier) = set.tier_of(item) {
            groups[tier].push(item.clone());
        }
    }
    groups
}

/// Partition `items` by successive predicate sets.
pub fn partition<T: Clone>(items: &[T], sets: &[NamedPredicateSet<T>]) -> Vec<Vec<T>> {
    let Some((first, rest)) = sets.split_first() else {
        return vec![items.to_vec()];
    };

    partition_exclusive(items, first)
        .into_iter()
        .filter(|group| !group.is_empty())
        .flat_map(|group| partition(&group, rest))
        .filter(|group| !group.is_empty())
        .collect()
}

/// Concatenate groups in order.
pub fn flatten<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    groups.into_iter().flatten().collect()
}
