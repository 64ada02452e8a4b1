//! Error types for yars.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to fetch feed page: {0}")]
    FeedFetch(String),

    // Resolution errors
    #[error("No media found in '{0}'")]
    NoMediaFound(String),

    // Download errors
    #[error("Got HTTP {status} for '{url}'")]
    HttpStatus { url: String, status: u16 },

    #[error("Content of '{0}' was already saved in this run")]
    DuplicateContent(String),

    #[error("Run cancelled")]
    Cancelled,

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether this error ends the whole run instead of a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Cancelled
                | Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
