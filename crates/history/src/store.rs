//! The store boundary used by the persistence decorator.

use crate::error::Result;
use crate::types::{CandidateId, ServedEntry};

/// Append-only served history, keyed by string.
///
/// The recommender core only ever writes through `append`/`append_batch`;
/// `served` exists for collaborators (such as an exclusion filter) that want
/// to read the history back.
///
/// `Send + Sync` lets one store handle be shared by every layer of a
/// recommender stack and across threads.
pub trait HistoryStore: Send + Sync {
    /// Short backend name for logging.
    fn name(&self) -> &str;

    /// Record `member` under `key` with `score` (epoch seconds).
    ///
    /// Re-appending an existing member overwrites its score.
    fn append(&self, key: &str, member: CandidateId, score: f64) -> Result<()>;

    /// Record several entries at once.
    ///
    /// Backends that can write atomically should override this; the default
    /// stops at the first failing entry.
    fn append_batch(&self, key: &str, entries: &[ServedEntry]) -> Result<()> {
        for entry in entries {
            self.append(key, entry.member, entry.score)?;
        }
        Ok(())
    }

    /// Everything recorded under `key`, ascending by score.
    fn served(&self, key: &str) -> Result<Vec<ServedEntry>>;
}
