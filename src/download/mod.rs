//! Download module for content downloading.
//!
//! This module provides:
//! - Media file downloading with content deduplication
//! - Run statistics

pub mod media;
pub mod state;

pub use media::{stream_to_file, DownloadOutcome, Downloader};
pub use state::RunStats;
