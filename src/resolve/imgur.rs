//! Imgur links.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::fs::url_extension;
use crate::media::ResolvedUrl;
use crate::resolve::markup::{fetch_markup, find_content_attr};
use crate::resolve::ResolveStrategy;

const STATIC_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Static images pass through; anything else is looked up for its MP4.
pub struct ImgurStrategy {
    client: Client,
}

impl ImgurStrategy {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Whether the URL already points at a static image.
pub fn is_static_image(url: &str) -> bool {
    url_extension(url).is_some_and(|ext| STATIC_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Find the direct MP4 URL in an imgur page.
pub fn extract_video_url(html: &str) -> Option<String> {
    find_content_attr(html, |content| {
        content.contains("i.imgur.com") && content.contains(".mp4")
    })
}

#[async_trait]
impl ResolveStrategy for ImgurStrategy {
    async fn resolve(&self, url: &str) -> Result<Vec<ResolvedUrl>> {
        if is_static_image(url) {
            return Ok(vec![ResolvedUrl::new(url)]);
        }

        let html = fetch_markup(&self.client, url).await?;
        let video = extract_video_url(&html).ok_or_else(|| Error::NoMediaFound(url.to_string()))?;
        Ok(vec![ResolvedUrl::new(video)])
    }
}
