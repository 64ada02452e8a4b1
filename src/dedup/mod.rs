//! Deduplication module.
//!
//! Provides:
//! - Running MD5 over downloaded bytes
//! - The run-scoped index of saved content

pub mod hash;
pub mod index;

pub use hash::{hash_bytes, StreamingHasher};
pub use index::DedupIndex;
