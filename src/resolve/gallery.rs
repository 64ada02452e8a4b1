//! Reddit galleries.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::api::RedditApi;
use crate::error::{Error, Result};
use crate::media::ResolvedUrl;
use crate::resolve::ResolveStrategy;

/// Host serving reduced-resolution gallery previews.
pub const PREVIEW_HOST: &str = "preview.redd.it";

/// Canonical full-resolution image host.
pub const IMAGE_HOST_BASE: &str = "https://i.redd.it/";

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Collects every preview image linked from a gallery page.
///
/// The page is fetched through the Reddit session; an anonymous request
/// gets the anti-bot interstitial instead of the gallery.
pub struct GalleryStrategy {
    api: Arc<RedditApi>,
}

impl GalleryStrategy {
    pub fn new(api: Arc<RedditApi>) -> Self {
        Self { api }
    }
}

/// Re-base the path of a preview URL onto the full-resolution host.
///
/// Scheme-relative and path-only hrefs are accepted; only the path is kept.
pub fn preview_to_full(href: &str) -> Result<String> {
    let base = Url::parse(IMAGE_HOST_BASE)?;
    let preview = base.join(href)?;
    let full = base.join(preview.path())?;
    Ok(full.to_string())
}

/// Full-resolution URLs for every preview link in the gallery markup,
/// in document order.
pub fn extract_gallery_images(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let images: Vec<String> = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(PREVIEW_HOST))
        .filter_map(|href| match preview_to_full(href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Skipping gallery link '{}': {}", href, e);
                None
            }
        })
        .collect();
    images
}

#[async_trait]
impl ResolveStrategy for GalleryStrategy {
    async fn resolve(&self, url: &str) -> Result<Vec<ResolvedUrl>> {
        let html = self.api.fetch_markup(url).await?;
        let images = extract_gallery_images(&html);

        if images.is_empty() {
            return Err(Error::NoMediaFound(url.to_string()));
        }

        tracing::debug!("Gallery {} has {} image(s)", url, images.len());
        Ok(images.into_iter().map(ResolvedUrl::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GALLERY_PAGE: &str = r#"<html><body>
<a href="https://www.reddit.com/user/someone/">someone</a>
<a href="https://preview.redd.it/p1xq5ngpoj471.jpg?width=640&amp;crop=smart&amp;auto=webp&amp;s=abc">
  <img src="https://preview.redd.it/p1xq5ngpoj471.jpg?width=108">
</a>
<a href="https://preview.redd.it/w0vyj7hpoj471.png?width=960&amp;format=png">second</a>
<a>no href</a>
</body></html>"#;

    #[test]
    fn test_preview_to_full() {
        assert_eq!(
            preview_to_full("https://preview.redd.it/abc123.jpg?width=640&s=x").unwrap(),
            "https://i.redd.it/abc123.jpg"
        );
        assert_eq!(
            preview_to_full("https://preview.redd.it/nested/path/img.png").unwrap(),
            "https://i.redd.it/nested/path/img.png"
        );
        assert_eq!(
            preview_to_full("//preview.redd.it/abc123.jpg?width=640").unwrap(),
            "https://i.redd.it/abc123.jpg"
        );
        assert!(preview_to_full("https://[broken").is_err());
    }

    #[test]
    fn test_extract_gallery_images() {
        let images = extract_gallery_images(GALLERY_PAGE);
        assert_eq!(
            images,
            vec![
                "https://i.redd.it/p1xq5ngpoj471.jpg",
                "https://i.redd.it/w0vyj7hpoj471.png"
            ]
        );
    }

    #[test]
    fn test_scheme_relative_preview_href() {
        let html = r#"<a href="//preview.redd.it/abc123.jpg?width=640">x</a>
<a href="https://preview.redd.it/def456.jpg">y</a>"#;
        assert_eq!(
            extract_gallery_images(html),
            vec!["https://i.redd.it/abc123.jpg", "https://i.redd.it/def456.jpg"]
        );
    }

    #[test]
    fn test_path_only_preview_href_keeps_its_path() {
        let html = r#"<a href="/media?url=preview.redd.it/x.jpg">x</a>"#;
        assert_eq!(extract_gallery_images(html), vec!["https://i.redd.it/media"]);
    }

    async fn serve_page(server: &MockServer, route: &str, status: u16, html: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(html.to_string(), "text/html; charset=utf-8"),
            )
            .mount(server)
            .await;
    }

    fn anonymous_api() -> Arc<RedditApi> {
        Arc::new(RedditApi::new("linux:yars:test", None, 100).unwrap())
    }

    #[tokio::test]
    async fn test_resolve_served_gallery() {
        let server = MockServer::start().await;
        serve_page(&server, "/gallery/nz70m9", 200, GALLERY_PAGE).await;

        let urls = GalleryStrategy::new(anonymous_api())
            .resolve(&format!("{}/gallery/nz70m9", server.uri()))
            .await
            .unwrap();

        assert_eq!(
            urls,
            vec![
                ResolvedUrl::new("https://i.redd.it/p1xq5ngpoj471.jpg"),
                ResolvedUrl::new("https://i.redd.it/w0vyj7hpoj471.png"),
            ]
        );
    }

    #[tokio::test]
    async fn test_gallery_without_previews() {
        let server = MockServer::start().await;
        serve_page(&server, "/gallery/empty", 200, "<html><body>blocked</body></html>").await;

        let result = GalleryStrategy::new(anonymous_api())
            .resolve(&format!("{}/gallery/empty", server.uri()))
            .await;

        assert!(matches!(result, Err(Error::NoMediaFound(_))));
    }

    #[tokio::test]
    async fn test_gallery_error_status() {
        let server = MockServer::start().await;
        serve_page(&server, "/gallery/private", 403, "").await;

        let result = GalleryStrategy::new(anonymous_api())
            .resolve(&format!("{}/gallery/private", server.uri()))
            .await;

        assert!(matches!(result, Err(Error::HttpStatus { status: 403, .. })));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_resolve_live_gallery() {
        let api = Arc::new(RedditApi::new("linux:yars:test", None, 100).unwrap());
        let urls = GalleryStrategy::new(api)
            .resolve("https://www.reddit.com/gallery/nz70m9")
            .await
            .unwrap();

        assert_eq!(urls.len(), 2);
        for url in urls {
            assert!(url.url.starts_with(IMAGE_HOST_BASE));
            assert!(url.url.len() > IMAGE_HOST_BASE.len());
        }
    }
}
