//! Merged Source - several recallers behind one
//!
//! ## Algorithm
//! 1. Recall from every source in registration order
//! 2. Concatenate, dropping ids already seen (first occurrence wins)
//! 3. Any source failure aborts the merge and names the source

use std::collections::HashSet;

use anyhow::{Context, Result};
use history::CandidateId;
use tracing::{debug, instrument};

use crate::Recaller;

/// Merges the output of several recallers, deduplicated by id.
pub struct MergedRecaller {
    sources: Vec<Box<dyn Recaller>>,
}

impl MergedRecaller {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source (builder pattern).
    pub fn add_source(mut self, source: impl Recaller + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for MergedRecaller {
    fn default() -> Self {
        Self::new()
    }
}

impl Recaller for MergedRecaller {
    fn name(&self) -> &str {
        "MergedRecaller"
    }

    #[instrument(skip(self), fields(sources = self.sources.len()))]
    fn recall(&self) -> Result<Vec<CandidateId>> {
        let mut seen: HashSet<CandidateId> = HashSet::new();
        let mut merged = Vec::new();

        for source in &self.sources {
            let candidates = source
                .recall()
                .with_context(|| format!("recall source {} failed", source.name()))?;
            let before = merged.len();
            for id in candidates {
                if seen.insert(id) {
                    merged.push(id);
                }
            }
            debug!(
                "Source {} contributed {} new candidates",
                source.name(),
                merged.len() - before
            );
        }

        debug!("Merged recall total after deduplication: {}", merged.len());
        Ok(merged)
    }
}
