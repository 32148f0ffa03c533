//! Named predicates and ordered predicate sets.

use std::fmt;
use std::sync::Arc;

use history::CandidateId;

/// A named, pure boolean test over `T`.
///
/// Cloning is cheap: the function is shared behind an `Arc`.
pub struct Predicate<T = CandidateId> {
    name: String,
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    pub fn new(name: impl Into<String>, test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// A predicate every item satisfies.
    pub fn always(name: impl Into<String>) -> Self {
        Self::new(name, |_| true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.test)(item)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

/// One partition layer: an ordered list of predicates, index 0 being the
/// highest-priority tier. The name is only used for diagnostics.
pub struct NamedPredicateSet<T = CandidateId> {
    pub name: String,
    pub predicates: Vec<Predicate<T>>,
}

impl<T> NamedPredicateSet<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicates: Vec::new(),
        }
    }

    /// Append a tier (builder pattern).
    pub fn with(
        mut self,
        name: impl Into<String>,
        test: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicates.push(Predicate::new(name, test));
        self
    }

    pub fn push(&mut self, predicate: Predicate<T>) {
        self.predicates.push(predicate);
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Index of the first predicate `item` satisfies.
    pub fn tier_of(&self, item: &T) -> Option<usize> {
        self.predicates.iter().position(|p| p.matches(item))
    }
}

impl<T> Clone for NamedPredicateSet<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<T> fmt::Debug for NamedPredicateSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedPredicateSet")
            .field("name", &self.name)
            .field("predicates", &self.predicates)
            .finish()
    }
}
