//! yars - download the media behind a Reddit user's or subreddit's posts.
//!
//! # Features
//!
//! - Walks a user's submissions or a subreddit's new listing, page by page
//! - Follows Redgifs watch pages, imgur links and Reddit galleries to the
//!   actual media files
//! - Skips files already on disk without fetching them
//! - Discards files whose content was already saved during the run
//! - Optional OAuth login for the authenticated API
//! - Clean cancellation: no partial files are left behind
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use yars::{Config, Downloader, Feed, Pipeline, RedditApi, UrlResolver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = Arc::new(RedditApi::new(
//!         &config.account.user_agent,
//!         config.account.credentials(),
//!         config.options.page_size,
//!     )?);
//!
//!     let pipeline = Pipeline::new(
//!         api.clone(),
//!         UrlResolver::new(api.clone()),
//!         Downloader::new(api.http_client().clone(), true),
//!         config.download_directory(),
//!         CancellationToken::new(),
//!     );
//!     let stats = pipeline.run(Feed::Subreddit("pics".into())).await?;
//!     println!("{} files saved", stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod resolve;

// Re-exports for convenience
pub use api::{ContentSource, RedditApi};
pub use config::{Config, Feed};
pub use dedup::DedupIndex;
pub use download::{DownloadOutcome, Downloader, RunStats};
pub use error::{Error, Result};
pub use media::{MediaType, Resolution, ResolvedUrl};
pub use pipeline::Pipeline;
pub use resolve::UrlResolver;
