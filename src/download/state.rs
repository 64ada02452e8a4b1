//! Run statistics.

use crate::media::MediaType;

/// Counters for one feed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    // Discovery
    pub posts_seen: u64,
    pub posts_repeated: u64,
    pub posts_unresolved: u64,

    // Saved files
    pub pic_count: u64,
    pub vid_count: u64,
    pub other_count: u64,

    // Skipped files
    pub already_present: u64,
    pub duplicate_count: u64,
    pub failed_count: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a newly saved file by its media type.
    pub fn record_saved(&mut self, media_type: MediaType) {
        match media_type {
            MediaType::Image => self.pic_count += 1,
            MediaType::Video => self.vid_count += 1,
            MediaType::Other => self.other_count += 1,
        }
    }

    /// Increment duplicate count.
    pub fn increment_duplicate(&mut self) {
        self.duplicate_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.other_count
    }

    /// Files that were not written for any reason.
    pub fn total_skipped(&self) -> u64 {
        self.already_present + self.duplicate_count + self.failed_count
    }
}
