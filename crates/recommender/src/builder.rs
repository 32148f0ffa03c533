//! Assemble a decorator stack from flags.
//!
//! Stack order, innermost first:
//!
//! ```text
//! PipelineEngine -> RetryingRecommender -> EscalatingRecommender -> PersistingRecommender
//! ```
//!
//! Retries happen before an empty result is escalated, and only what
//! actually reaches the caller is recorded as served.

use std::sync::Arc;

use history::{HistoryStore, UserId};
use pipeline::{FilterRule, Sorter};
use sources::Recaller;

use crate::decorators::{EscalatingRecommender, PersistingRecommender, RetryingRecommender};
use crate::engine::PipelineEngine;
use crate::recommender::Recommender;

pub struct RecommendBuilder {
    engine: PipelineEngine,
    retry_count: Option<usize>,
    require_non_empty: bool,
    memory: Option<(Arc<dyn HistoryStore>, String)>,
}

impl RecommendBuilder {
    pub fn new(user_id: UserId, recaller: impl Recaller + 'static) -> Self {
        Self {
            engine: PipelineEngine::new(user_id, recaller),
            retry_count: None,
            require_non_empty: false,
            memory: None,
        }
    }

    pub fn filter_rule(mut self, rule: impl FilterRule + 'static) -> Self {
        self.engine = self.engine.with_filter_rule(rule);
        self
    }

    pub fn sorter(mut self, sorter: impl Sorter + 'static) -> Self {
        self.engine = self.engine.with_sorter(sorter);
        self
    }

    pub fn post_sorter(mut self, sorter: impl Sorter + 'static) -> Self {
        self.engine = self.engine.with_post_sorter(sorter);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.engine = self.engine.with_seed(seed);
        self
    }

    /// Wrap in a [`RetryingRecommender`] allowing `retry_count` attempts.
    pub fn retry(mut self, retry_count: usize) -> Self {
        self.retry_count = Some(retry_count);
        self
    }

    /// Wrap in an [`EscalatingRecommender`].
    pub fn require_non_empty(mut self) -> Self {
        self.require_non_empty = true;
        self
    }

    /// Wrap in a [`PersistingRecommender`] writing under `key`.
    pub fn remember(mut self, store: Arc<dyn HistoryStore>, key: impl Into<String>) -> Self {
        self.memory = Some((store, key.into()));
        self
    }

    pub fn build(self) -> Box<dyn Recommender> {
        let mut stack: Box<dyn Recommender> = Box::new(self.engine);
        if let Some(retry_count) = self.retry_count {
            stack = Box::new(RetryingRecommender::new(stack, retry_count));
        }
        if self.require_non_empty {
            stack = Box::new(EscalatingRecommender::new(stack));
        }
        if let Some((store, key)) = self.memory {
            stack = Box::new(PersistingRecommender::new(stack, store).with_memory_key(key));
        }
        stack
    }
}
