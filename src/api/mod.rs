//! Reddit API module.
//!
//! This module provides:
//! - The [`ContentSource`] capability the paginator walks
//! - HTTP client for Reddit's listing endpoints
//! - OAuth password-grant authentication
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::config::Feed;
use crate::error::Result;

pub use client::RedditApi;
pub use types::Post;

/// A paginated, newest-first listing of posts.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the page following the post whose id is `after`
    /// (the first page when `None`).
    async fn fetch_page(&self, feed: &Feed, after: Option<&str>) -> Result<Vec<Post>>;
}
