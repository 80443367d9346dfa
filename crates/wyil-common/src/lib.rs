//! Common types shared by the wyil crates.
//!
//! - String interning (`Atom`, `ShardedInterner`)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, ShardedInterner};
