//! Filter rule implementations.
//!
//! This module contains the concrete rules that can be composed into a
//! FilterChain.

pub mod already_served;
pub mod blocklist;
pub mod parity;

// Re-export for convenience
pub use already_served::AlreadyServedFilter;
pub use blocklist::BlocklistFilter;
pub use parity::{Parity, ParityFilter};
