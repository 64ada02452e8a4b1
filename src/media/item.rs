//! Resolved media representation.

use crate::fs::naming::url_extension;

/// Kind of media, judged from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Other,
}

impl MediaType {
    /// Classify a file extension (without dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => MediaType::Image,
            "mp4" | "webm" | "mov" | "gifv" => MediaType::Video,
            _ => MediaType::Other,
        }
    }

    /// Classify a URL by the extension of its last path segment.
    pub fn from_url(url: &str) -> Self {
        url_extension(url)
            .map(|ext| Self::from_extension(&ext))
            .unwrap_or(MediaType::Other)
    }
}

/// A direct, fetchable media URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
}

impl ResolvedUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_url(&self.url)
    }
}

/// Everything one post URL resolved to, in download order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub source_url: String,
    pub media: Vec<ResolvedUrl>,
}

impl Resolution {
    /// Resolution to a single URL.
    pub fn single(source_url: &str, url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.to_string(),
            media: vec![ResolvedUrl::new(url)],
        }
    }

    /// A post whose files get their own subdirectory.
    pub fn is_gallery(&self) -> bool {
        self.media.len() > 1
    }
}
