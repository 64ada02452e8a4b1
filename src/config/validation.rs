//! Configuration validation logic.

use crate::config::loader::{Config, MAX_PAGE_SIZE};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,20}$").unwrap());

static SUBREDDIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{2,21}$").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_credentials(config)?;
    validate_user_agent(&config.account.user_agent)?;
    validate_page_size(config.options.page_size)?;

    Ok(())
}

/// Credentials are all-or-nothing.
pub fn validate_credentials(config: &Config) -> Result<()> {
    let account = &config.account;
    let fields = [
        ("client_id", &account.client_id),
        ("client_secret", &account.client_secret),
        ("username", &account.username),
        ("password", &account.password),
    ];

    let present = fields
        .iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| !v.is_empty()))
        .count();

    if present == 0 || present == fields.len() {
        return Ok(());
    }

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect();

    Err(Error::MissingConfig(format!(
        "account credentials are incomplete, missing: {}",
        missing.join(", ")
    )))
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate the listing page size.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!("must be between 1 and {} (got {})", MAX_PAGE_SIZE, page_size),
        });
    }

    Ok(())
}

/// Normalize and validate a username given on the command line.
///
/// Accepts `name`, `u/name` and `/u/name`.
pub fn parse_username(input: &str) -> Result<String> {
    let name = strip_prefix(input.trim(), "u/");

    if !USERNAME_PATTERN.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "user".to_string(),
            message: format!(
                "'{}' is not a valid username (3-20 letters, digits, '-' or '_')",
                input
            ),
        });
    }

    Ok(name.to_string())
}

/// Normalize and validate a subreddit name given on the command line.
///
/// Accepts `name`, `r/name` and `/r/name`.
pub fn parse_subreddit(input: &str) -> Result<String> {
    let name = strip_prefix(input.trim(), "r/");

    if !SUBREDDIT_PATTERN.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "subreddit".to_string(),
            message: format!(
                "'{}' is not a valid subreddit name (2-21 letters, digits or '_')",
                input
            ),
        });
    }

    Ok(name.to_string())
}

fn strip_prefix<'a>(input: &'a str, prefix: &str) -> &'a str {
    let input = input.trim_start_matches('/');
    input
        .strip_prefix(prefix)
        .unwrap_or(input)
        .trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccountConfig;

    #[test]
    fn test_valid_username() {
        assert_eq!(parse_username("spez").unwrap(), "spez");
        assert_eq!(parse_username("u/some_user").unwrap(), "some_user");
        assert_eq!(parse_username("/u/user-name/").unwrap(), "user-name");
    }

    #[test]
    fn test_invalid_username() {
        assert!(parse_username("ab").is_err());
        assert!(parse_username("has space").is_err());
        assert!(parse_username("a_name_that_is_far_too_long").is_err());
    }

    #[test]
    fn test_subreddit() {
        assert_eq!(parse_subreddit("r/rust").unwrap(), "rust");
        assert_eq!(parse_subreddit("/r/EarthPorn").unwrap(), "EarthPorn");
        assert!(parse_subreddit("no-dashes").is_err());
        assert!(parse_subreddit("r/").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_incomplete_credentials() {
        let config = Config {
            account: AccountConfig {
                client_id: Some("id".into()),
                client_secret: Some("secret".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        match validate_config(&config) {
            Err(Error::MissingConfig(message)) => {
                assert!(message.contains("username"));
                assert!(message.contains("password"));
                assert!(!message.contains("client_id"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(100).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        assert!(validate_user_agent("  ").is_err());
    }
}
