//! Redgifs watch pages.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::media::ResolvedUrl;
use crate::resolve::markup::{fetch_markup, find_content_attr};
use crate::resolve::ResolveStrategy;

/// Picks the mobile MP4 rendition advertised in the watch page metadata.
pub struct RedgifsStrategy {
    client: Client,
}

impl RedgifsStrategy {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Whether a metadata value points at the mobile MP4 rendition.
pub fn is_mobile_video(content: &str) -> bool {
    content.contains("redgifs.com") && content.contains(".mp4") && content.contains("-mobile")
}

/// Find the mobile video URL in watch page markup.
pub fn extract_video_url(html: &str) -> Option<String> {
    find_content_attr(html, is_mobile_video)
}

#[async_trait]
impl ResolveStrategy for RedgifsStrategy {
    async fn resolve(&self, url: &str) -> Result<Vec<ResolvedUrl>> {
        let html = fetch_markup(&self.client, url).await?;
        let video = extract_video_url(&html).ok_or_else(|| Error::NoMediaFound(url.to_string()))?;
        Ok(vec![ResolvedUrl::new(video)])
    }
}
