//! Page fetching and metadata scanning shared by the strategies.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{Error, Result};

static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[content]").expect("content selector"));

/// Plain GET of a page's markup.
pub async fn fetch_markup(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("Fetching markup of {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// First `content` attribute value, in document order, that satisfies
/// `accept`.
pub fn find_content_attr<F>(html: &str, accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let document = Html::parse_document(html);
    let found = document
        .select(&CONTENT_SELECTOR)
        .filter_map(|element| element.value().attr("content"))
        .find(|content| accept(content))
        .map(str::to_string);
    found
}
