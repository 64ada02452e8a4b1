//! OAuth password-grant authentication for Reddit script apps.

use std::time::{Duration, Instant};

use reqwest::Client;

use crate::api::types::TokenResponse;
use crate::config::Credentials;
use crate::error::{Error, Result};

/// Reddit OAuth token endpoint.
pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Tokens are refreshed this long before Reddit would reject them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the endpoint omits `expires_in`.
const DEFAULT_LIFETIME: Duration = Duration::from_secs(3600);

/// A bearer token and the moment it stops being usable.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    /// Check if the token needs to be refreshed at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN >= self.expires_at
    }

    /// Check if the token needs to be refreshed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Turn a token endpoint response into an [`AccessToken`].
pub fn token_from_response(response: TokenResponse, now: Instant) -> Result<AccessToken> {
    if let Some(error) = response.error {
        return Err(Error::Authentication(error));
    }

    let value = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Authentication("token response has no access_token".into()))?;

    if let Some(kind) = response.token_type.as_deref() {
        if !kind.eq_ignore_ascii_case("bearer") {
            return Err(Error::Authentication(format!(
                "unexpected token type '{}'",
                kind
            )));
        }
    }

    let lifetime = response
        .expires_in
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_LIFETIME);

    Ok(AccessToken {
        value,
        expires_at: now + lifetime,
    })
}

/// Request a new access token with the password grant.
pub async fn request_access_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken> {
    tracing::debug!("Requesting access token for {}", credentials.username);

    let response = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if status == 401 || status == 403 {
        return Err(Error::Authentication(format!(
            "HTTP {}: check client_id and client_secret",
            status
        )));
    }
    if !status.is_success() {
        return Err(Error::Authentication(format!("HTTP {}", status)));
    }

    let body: TokenResponse = response.json().await?;
    token_from_response(body, Instant::now())
}
