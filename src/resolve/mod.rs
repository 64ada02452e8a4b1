//! Link resolution.
//!
//! Post URLs are classified by shape, first match wins:
//! - Redgifs watch pages
//! - Reddit galleries
//! - imgur links
//! - anything else is taken as already direct

pub mod gallery;
pub mod imgur;
pub mod markup;
pub mod redgifs;

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::RedditApi;
use crate::error::{Error, Result};
use crate::media::{Resolution, ResolvedUrl};

pub use gallery::GalleryStrategy;
pub use imgur::ImgurStrategy;
pub use redgifs::RedgifsStrategy;

static REDGIFS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[wm.]*redgifs\.com/watch/([a-zA-Z0-9_-]+)").unwrap());

static GALLERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9.]{0,4}reddit\.com/gallery/([a-zA-Z0-9]+)").unwrap()
});

static IMGUR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://i\.imgur\.com/([a-zA-Z0-9]+)").unwrap());

/// Shape of a post URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Redgifs,
    Gallery,
    Imgur,
    Direct,
}

impl LinkKind {
    /// Classify a URL.
    pub fn classify(url: &str) -> Self {
        if REDGIFS_PATTERN.is_match(url) {
            LinkKind::Redgifs
        } else if GALLERY_PATTERN.is_match(url) {
            LinkKind::Gallery
        } else if IMGUR_PATTERN.is_match(url) {
            LinkKind::Imgur
        } else {
            LinkKind::Direct
        }
    }
}

/// Maps one indirect URL to the direct media URLs behind it.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<Vec<ResolvedUrl>>;
}

/// Dispatches post URLs to the matching strategy.
pub struct UrlResolver {
    redgifs: Box<dyn ResolveStrategy>,
    gallery: Box<dyn ResolveStrategy>,
    imgur: Box<dyn ResolveStrategy>,
}

impl UrlResolver {
    /// Resolver using the Reddit session for galleries and its HTTP client
    /// for plain page fetches.
    pub fn new(api: Arc<RedditApi>) -> Self {
        let client = api.http_client().clone();
        Self {
            redgifs: Box::new(RedgifsStrategy::new(client.clone())),
            gallery: Box::new(GalleryStrategy::new(api)),
            imgur: Box::new(ImgurStrategy::new(client)),
        }
    }

    /// Resolver with custom strategies.
    pub fn with_strategies(
        redgifs: Box<dyn ResolveStrategy>,
        gallery: Box<dyn ResolveStrategy>,
        imgur: Box<dyn ResolveStrategy>,
    ) -> Self {
        Self {
            redgifs,
            gallery,
            imgur,
        }
    }

    fn strategy(&self, kind: LinkKind) -> Option<&dyn ResolveStrategy> {
        match kind {
            LinkKind::Redgifs => Some(self.redgifs.as_ref()),
            LinkKind::Gallery => Some(self.gallery.as_ref()),
            LinkKind::Imgur => Some(self.imgur.as_ref()),
            LinkKind::Direct => None,
        }
    }

    /// Resolve a post URL into one or more direct media URLs.
    pub async fn resolve(&self, url: &str) -> Result<Resolution> {
        let kind = LinkKind::classify(url);
        tracing::debug!("Resolving {} as {:?}", url, kind);

        let Some(strategy) = self.strategy(kind) else {
            return Ok(Resolution::single(url, url));
        };

        let media = strategy.resolve(url).await?;
        if media.is_empty() {
            return Err(Error::NoMediaFound(url.to_string()));
        }

        Ok(Resolution {
            source_url: url.to_string(),
            media,
        })
    }
}
