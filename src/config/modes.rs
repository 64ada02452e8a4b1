//! Feed definitions.

use std::fmt;

/// Which Reddit listing a run walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Posts submitted by a user.
    User(String),
    /// Posts in a subreddit.
    Subreddit(String),
}

impl Feed {
    /// The user or subreddit name.
    pub fn name(&self) -> &str {
        match self {
            Feed::User(name) | Feed::Subreddit(name) => name,
        }
    }

    /// Listing path relative to the API base, without query.
    pub fn listing_path(&self) -> String {
        match self {
            Feed::User(name) => format!("/user/{}/submitted", name),
            Feed::Subreddit(name) => format!("/r/{}/new", name),
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::User(name) => write!(f, "u/{}", name),
            Feed::Subreddit(name) => write!(f, "r/{}", name),
        }
    }
}
