//! Run-scoped record of saved content.

use std::collections::HashSet;

/// Hex digests of every file saved during the current run.
///
/// Owned by the consumer side of the pipeline and handed to the
/// downloader by `&mut`; nothing is persisted between runs.
#[derive(Debug, Default)]
pub struct DedupIndex {
    hashes: HashSet<String>,
}

impl DedupIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a digest belongs to content already saved.
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Record the digest of a saved file. Returns false if it was known.
    pub fn insert(&mut self, hash: String) -> bool {
        self.hashes.insert(hash)
    }

    /// Number of distinct digests recorded.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut index = DedupIndex::new();
        assert!(index.is_empty());
        assert!(!index.contains("abc123"));

        assert!(index.insert("abc123".to_string()));
        assert!(index.contains("abc123"));
        assert!(!index.insert("abc123".to_string()));
        assert_eq!(index.len(), 1);
    }
}
