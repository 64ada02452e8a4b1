//! API response type definitions.

use serde::Deserialize;

/// Listing envelope returned by every feed endpoint.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

/// Listing payload.
#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// One listing child.
#[derive(Debug, Deserialize)]
pub struct Thing {
    pub data: PostData,
}

/// The subset of a post we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct PostData {
    /// Fullname, e.g. `t3_nz70m9`.
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A post as consumed by the paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Cursor token for this post.
    pub id: String,
    /// Link target of the post.
    pub url: String,
}

impl From<Thing> for Post {
    fn from(thing: Thing) -> Self {
        Post {
            id: thing.data.name,
            url: thing.data.url.unwrap_or_default(),
        }
    }
}

impl Listing {
    /// Convert the listing children into posts, in page order.
    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(Post::from).collect()
    }
}

/// OAuth token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}
