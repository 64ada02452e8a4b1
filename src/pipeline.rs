//! Feed processing: discovery, resolution and download wired together.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::ContentSource;
use crate::config::Feed;
use crate::dedup::DedupIndex;
use crate::download::{DownloadOutcome, Downloader, RunStats};
use crate::error::{Error, Result};
use crate::feed::discover;
use crate::fs::{ensure_dir, get_download_path};
use crate::media::Resolution;
use crate::resolve::UrlResolver;

/// Downloads every media file reachable from one feed.
pub struct Pipeline {
    source: Arc<dyn ContentSource>,
    resolver: UrlResolver,
    downloader: Downloader,
    output_dir: PathBuf,
    cancel: CancellationToken,
    show_downloads: bool,
    show_skipped: bool,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        resolver: UrlResolver,
        downloader: Downloader,
        output_dir: impl Into<PathBuf>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            resolver,
            downloader,
            output_dir: output_dir.into(),
            cancel,
            show_downloads: true,
            show_skipped: false,
        }
    }

    /// Log each saved file at info level.
    pub fn show_downloads(mut self, show: bool) -> Self {
        self.show_downloads = show;
        self
    }

    /// Log files skipped as present or duplicate at info level.
    pub fn show_skipped(mut self, show: bool) -> Self {
        self.show_skipped = show;
        self
    }

    /// Walk `feed` to its end and download everything it links to.
    ///
    /// Per-post and per-file failures are logged and counted in the
    /// returned statistics, including authentication failures while
    /// resolving. The run fails only when the output directory cannot be
    /// created or the cancellation token fires.
    pub async fn run(&self, feed: Feed) -> Result<RunStats> {
        ensure_dir(&self.output_dir).await?;
        tracing::info!("Downloading {} into {}", feed, self.output_dir.display());

        let mut urls = discover(self.source.clone(), feed, self.cancel.clone());
        let mut index = DedupIndex::new();
        let mut processed: HashSet<String> = HashSet::new();
        let mut stats = RunStats::new();

        loop {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(Error::Cancelled),
                next = urls.next() => next,
            };
            let Some(post_url) = next else {
                break;
            };

            stats.posts_seen += 1;
            if processed.contains(&post_url) {
                tracing::debug!("Already processed {}", post_url);
                stats.posts_repeated += 1;
                continue;
            }

            let resolved = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(Error::Cancelled),
                resolved = self.resolver.resolve(&post_url) => resolved,
            };
            let resolution = match resolved {
                Ok(resolution) => resolution,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!("Could not resolve {}: {}", post_url, e);
                    stats.posts_unresolved += 1;
                    processed.insert(post_url);
                    continue;
                }
            };

            self.download_resolution(&resolution, &mut index, &mut stats)
                .await?;
            processed.insert(post_url);
        }

        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tracing::info!(
            "Finished {} posts: {} downloaded, {} skipped",
            stats.posts_seen,
            stats.total_downloaded(),
            stats.total_skipped()
        );
        Ok(stats)
    }

    /// Download every URL of one resolution in order. Only fatal errors
    /// are returned.
    async fn download_resolution(
        &self,
        resolution: &Resolution,
        index: &mut DedupIndex,
        stats: &mut RunStats,
    ) -> Result<()> {
        let dest_dir = match self.prepare_dir(resolution).await {
            Ok(dir) => dir,
            Err(e) => {
                tracing::warn!(
                    "No destination for {}: {}",
                    resolution.source_url,
                    e
                );
                stats.failed_count += resolution.media.len() as u64;
                return Ok(());
            }
        };

        for item in &resolution.media {
            match self
                .downloader
                .download(&item.url, &dest_dir, index, &self.cancel)
                .await
            {
                Ok(DownloadOutcome::Saved { path, bytes }) => {
                    stats.record_saved(item.media_type());
                    if self.show_downloads {
                        tracing::info!("Saved {} ({} bytes)", path.display(), bytes);
                    } else {
                        tracing::debug!("Saved {} ({} bytes)", path.display(), bytes);
                    }
                }
                Ok(DownloadOutcome::AlreadyPresent(path)) => {
                    stats.already_present += 1;
                    self.report_skip(&format!("{} already exists", path.display()));
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(Error::DuplicateContent(url)) => {
                    stats.increment_duplicate();
                    self.report_skip(&format!("Duplicate content at {}", url));
                }
                Err(e) => {
                    stats.failed_count += 1;
                    tracing::warn!("Failed to download {}: {}", item.url, e);
                }
            }
        }

        Ok(())
    }

    async fn prepare_dir(&self, resolution: &Resolution) -> Result<PathBuf> {
        let dir = get_download_path(&self.output_dir, resolution)?;
        if dir != self.output_dir {
            ensure_dir(&dir).await?;
        }
        Ok(dir)
    }

    fn report_skip(&self, message: &str) {
        if self.show_skipped {
            tracing::info!("Skipped: {}", message);
        } else {
            tracing::debug!("Skipped: {}", message);
        }
    }
}
