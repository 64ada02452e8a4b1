//! Content hashing for deduplication.

use md5::{Digest, Md5};

/// Running MD5 over a byte stream, readable at any point.
#[derive(Debug, Clone, Default)]
pub struct StreamingHasher {
    hasher: Md5,
    bytes: u64,
}

impl StreamingHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Hex digest of everything fed so far. The hasher keeps running.
    pub fn current_hex(&self) -> String {
        format!("{:x}", self.hasher.clone().finalize())
    }

    /// Number of bytes fed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Hex MD5 of a complete buffer.
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}
