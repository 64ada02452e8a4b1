//! Reddit HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use tokio::sync::RwLock;
use url::Url;

use crate::api::auth::{request_access_token, AccessToken, TOKEN_URL};
use crate::api::types::{Listing, Post};
use crate::api::ContentSource;
use crate::config::{Credentials, Feed};
use crate::error::{Error, Result};

/// Public JSON API base URL.
pub const PUBLIC_BASE: &str = "https://www.reddit.com";

/// OAuth API base URL, used once logged in.
pub const OAUTH_BASE: &str = "https://oauth.reddit.com";

/// Reddit client holding the HTTP session and the optional login.
pub struct RedditApi {
    client: Client,
    credentials: Option<Credentials>,
    token: Arc<RwLock<Option<AccessToken>>>,
    page_size: u32,
}

impl RedditApi {
    /// Create a new client. No request is sent until the first call.
    pub fn new(user_agent: &str, credentials: Option<Credentials>, page_size: u32) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            token: Arc::new(RwLock::new(None)),
            page_size,
        })
    }

    /// The underlying HTTP session, shared with the resolver and downloader.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Whether requests go through the OAuth API.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Obtain a token up front so bad credentials fail the run early.
    pub async fn login(&self) -> Result<()> {
        if self.bearer().await?.is_some() {
            tracing::info!("Logged in to Reddit");
        }
        Ok(())
    }

    /// Current bearer token, refreshed when expired.
    async fn bearer(&self) -> Result<Option<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };

        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref().filter(|t| !t.is_expired()) {
                return Ok(Some(token.value.clone()));
            }
        }

        let mut token = self.token.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(current) = token.as_ref().filter(|t| !t.is_expired()) {
            return Ok(Some(current.value.clone()));
        }

        let fresh = request_access_token(&self.client, TOKEN_URL, credentials).await?;
        let value = fresh.value.clone();
        *token = Some(fresh);
        Ok(Some(value))
    }

    /// Make a GET request, attaching the bearer token when logged in.
    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(bearer) = self.bearer().await? {
            request = request.header(header::AUTHORIZATION, format!("bearer {}", bearer));
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }

    /// Fetch one listing page.
    pub async fn get_listing(&self, feed: &Feed, after: Option<&str>) -> Result<Listing> {
        let base = if self.is_authenticated() {
            OAUTH_BASE
        } else {
            PUBLIC_BASE
        };
        let url = listing_url(base, feed, after, self.page_size)?;

        let response = self.get(url.as_str()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::FeedFetch(format!("{}: HTTP {}", feed, status)));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::FeedFetch(format!(
                "Failed to parse listing: {} - Response: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Fetch a reddit.com page through the session, decoding it with the
    /// charset its `Content-Type` declares.
    pub async fn fetch_markup(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContentSource for RedditApi {
    async fn fetch_page(&self, feed: &Feed, after: Option<&str>) -> Result<Vec<Post>> {
        Ok(self.get_listing(feed, after).await?.into_posts())
    }
}

/// Build the URL of a newest-first, all-time listing page.
pub fn listing_url(base: &str, feed: &Feed, after: Option<&str>, limit: u32) -> Result<Url> {
    let mut path = feed.listing_path();
    if base == PUBLIC_BASE {
        path.push_str(".json");
    }

    let mut url = Url::parse(base)?.join(&path)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("sort", "new")
            .append_pair("t", "all")
            .append_pair("limit", &limit.to_string())
            .append_pair("raw_json", "1");
        if let Some(after) = after {
            query.append_pair("after", after);
        }
    }

    Ok(url)
}
