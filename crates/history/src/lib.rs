//! # History Crate
//!
//! Shared identifiers and the append-only served-history store.
//!
//! ## Main Components
//!
//! - **types**: `CandidateId`, `UserId`, `ServedEntry`
//! - **store**: the `HistoryStore` trait
//! - **memory**: mutex-guarded in-process store
//! - **jsonl**: append-only JSON-lines file store
//! - **error**: error types for store operations
//!
//! ## Example Usage
//!
//! ```ignore
//! use history::{HistoryStore, InMemoryHistoryStore, DEFAULT_MEMORY_KEY};
//!
//! let store = InMemoryHistoryStore::new();
//! store.append(DEFAULT_MEMORY_KEY, 101, 1_700_000_000.0)?;
//!
//! for entry in store.served(DEFAULT_MEMORY_KEY)? {
//!     println!("{} served at {}", entry.member, entry.score);
//! }
//! ```
//!
//! Stores keep sorted-set semantics: a member appended twice under the same
//! key keeps only its latest score.

pub mod error;
pub mod types;
pub mod store;
pub mod memory;
pub mod jsonl;

// Re-export commonly used types for convenience
pub use error::{HistoryError, Result};
pub use jsonl::JsonlHistoryStore;
pub use memory::InMemoryHistoryStore;
pub use store::HistoryStore;
pub use types::{CandidateId, ServedEntry, UserId, DEFAULT_MEMORY_KEY};
