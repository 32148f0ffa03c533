//! The FilterChain runs filter rules in declaration order.
//!
//! This module provides the FilterChain struct that chains multiple rules
//! together using the builder pattern.

use history::{CandidateId, UserId};
use thiserror::Error;
use tracing;

use crate::traits::FilterRule;

/// A rule failed; the chain stopped at it.
#[derive(Error, Debug)]
#[error("filter rule {rule} failed: {source}")]
pub struct RuleFailure {
    pub rule: String,
    #[source]
    pub source: anyhow::Error,
}

/// Chains multiple filter rules together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let chain = FilterChain::new()
///     .add_rule(ParityFilter::new(Parity::Odd))
///     .add_rule(BlocklistFilter::new([13, 666]));
///
/// let filtered = chain.apply(user_id, candidates)?;
/// ```
pub struct FilterChain {
    rules: Vec<Box<dyn FilterRule>>,
}

impl FilterChain {
    /// Create a new empty FilterChain.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule to the chain (builder pattern).
    pub fn add_rule(mut self, rule: impl FilterRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each rule in order:
    ///    a. Apply the rule to the previous output
    ///    b. On failure, stop and report the rule; later rules do not run
    ///    c. On an empty result, stop and return it (not an error)
    /// 3. Return the final filtered set
    pub fn apply(
        &self,
        user_id: UserId,
        candidates: Vec<CandidateId>,
    ) -> Result<Vec<CandidateId>, RuleFailure> {
        let mut current = candidates;
        for rule in &self.rules {
            tracing::debug!(
                "Applying filter rule: {} (input count: {})",
                rule.name(),
                current.len()
            );
            current = rule.apply(user_id, current).map_err(|source| RuleFailure {
                rule: rule.name().to_string(),
                source,
            })?;
            tracing::debug!(
                "Filter rule applied: {} (output count: {})",
                rule.name(),
                current.len()
            );
            if current.is_empty() {
                tracing::debug!("Filter rule {} left no candidates, stopping chain", rule.name());
                return Ok(Vec::new());
            }
        }
        Ok(current)
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Parity, ParityFilter};
    use anyhow::{anyhow, Result};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and passes candidates through untouched.
    struct CountingRule {
        calls: Arc<AtomicUsize>,
    }

    impl FilterRule for CountingRule {
        fn name(&self) -> &str {
            "CountingRule"
        }

        fn apply(&self, _user_id: UserId, candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(candidates)
        }
    }

    struct DropAll;

    impl FilterRule for DropAll {
        fn name(&self) -> &str {
            "DropAll"
        }

        fn apply(&self, _user_id: UserId, _candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
            Ok(Vec::new())
        }
    }

    struct Broken;

    impl FilterRule for Broken {
        fn name(&self) -> &str {
            "Broken"
        }

        fn apply(&self, _user_id: UserId, _candidates: Vec<CandidateId>) -> Result<Vec<CandidateId>> {
            Err(anyhow!("backend down"))
        }
    }

    #[test]
    fn test_empty_chain() {
        let chain = FilterChain::new();
        let filtered = chain.apply(1, vec![1, 2]).unwrap();
        assert_eq!(filtered, vec![1, 2]);
    }

    #[test]
    fn test_single_rule() {
        let chain = FilterChain::new().add_rule(ParityFilter::new(Parity::Odd));
        let filtered = chain.apply(1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(filtered, vec![1, 3]);
    }

    #[test]
    fn test_empty_result_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = FilterChain::new()
            .add_rule(DropAll)
            .add_rule(CountingRule { calls: calls.clone() });

        let filtered = chain.apply(1, vec![1, 2, 3]).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0, "later rules must not run");
    }

    #[test]
    fn test_failure_aborts_and_names_rule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = FilterChain::new()
            .add_rule(Broken)
            .add_rule(CountingRule { calls: calls.clone() });

        let err = chain.apply(1, vec![1]).unwrap_err();
        assert_eq!(err.rule, "Broken");
        assert!(err.to_string().contains("backend down"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
