//! Configuration module for yars.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Feed selection
//! - Configuration and name validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, Credentials, OptionsConfig};
pub use modes::Feed;
pub use validation::{parse_subreddit, parse_username, validate_config};
