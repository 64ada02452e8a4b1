//! Feed pagination.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::ContentSource;
use crate::config::Feed;

/// Capacity of the handoff between discovery and consumption.
const HANDOFF_CAPACITY: usize = 1;

/// Lazy sequence of post URLs fed by the background discovery task.
///
/// Not restartable: once the sequence ends, a new run needs a new
/// [`discover`] call.
pub struct PostUrls {
    rx: mpsc::Receiver<String>,
    task: JoinHandle<()>,
}

impl PostUrls {
    /// Wait for the next post URL. `None` once discovery has stopped and
    /// every discovered URL has been taken.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

impl Drop for PostUrls {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start walking `feed` newest-first in the background.
///
/// The task stops when a page comes back empty, a page request fails or
/// `cancel` fires. Request failures are logged, not returned: the URLs
/// already handed over are still processed.
pub fn discover(
    source: Arc<dyn ContentSource>,
    feed: Feed,
    cancel: CancellationToken,
) -> PostUrls {
    let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
    let task = tokio::spawn(produce(source, feed, cancel, tx));
    PostUrls { rx, task }
}

async fn produce(
    source: Arc<dyn ContentSource>,
    feed: Feed,
    cancel: CancellationToken,
    tx: mpsc::Sender<String>,
) {
    let mut cursor: Option<String> = None;
    let mut pages = 0u64;

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("Discovery for {} cancelled", feed);
            return;
        }

        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Discovery for {} cancelled during page fetch", feed);
                return;
            }
            page = source.fetch_page(&feed, cursor.as_deref()) => page,
        };

        let posts = match page {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Stopping discovery for {}: {}", feed, e);
                return;
            }
        };

        if posts.is_empty() {
            tracing::info!("Reached the end of {} after {} page(s)", feed, pages);
            return;
        }

        pages += 1;
        cursor = posts.last().map(|p| p.id.clone());
        tracing::debug!("Page {} of {}: {} post(s)", pages, feed, posts.len());

        for post in posts {
            if post.url.is_empty() {
                tracing::debug!("Post {} has no link, skipping", post.id);
                continue;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                sent = tx.send(post.url) => {
                    if sent.is_err() {
                        // Consumer is gone
                        return;
                    }
                }
            }
        }
    }
}
