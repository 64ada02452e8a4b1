//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".yars.toml";

/// Output directory used when neither the CLI nor the config names one.
pub const DEFAULT_DOWNLOAD_DIRECTORY: &str = "./downloaded";

/// Largest page Reddit serves for a listing.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Reddit account credentials.
///
/// All four credential fields are optional, but either all or none must be
/// set. Without them the public JSON listings are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Client ID of a Reddit "script" app.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret of that app.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Reddit username owning the app.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for that username.
    #[serde(default)]
    pub password: Option<String>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Posts requested per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whether to log saved files and show progress bars.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to log files skipped as already present or duplicate.
    #[serde(default)]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            page_size: MAX_PAGE_SIZE,
            show_downloads: true,
            show_skipped_downloads: false,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Complete credential set for the OAuth password grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl AccountConfig {
    /// Return the credentials if every field is present.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            client_id: self.client_id.clone()?,
            client_secret: self.client_secret.clone()?,
            username: self.username.clone()?,
            password: self.password.clone()?,
        })
    }
}

fn default_user_agent() -> String {
    format!(
        "{}:yars:v{} (media downloader)",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    )
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!("Using config file: {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Default config location: `~/.yars.toml`, or the working directory
    /// when no home directory is known.
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIRECTORY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.options.page_size, 100);
        assert!(config.options.show_downloads);
        assert!(!config.options.show_skipped_downloads);
        assert!(config.account.credentials().is_none());
        assert!(config.account.user_agent.contains("yars"));
        assert_eq!(config.download_directory(), PathBuf::from("./downloaded"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[account]
client_id = "id"
client_secret = "secret"
username = "someone"
password = "hunter2"

[options]
download_directory = "/tmp/media"
page_size = 25
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.options.page_size, 25);
        assert_eq!(config.download_directory(), PathBuf::from("/tmp/media"));
        assert!(config.options.show_downloads);

        let creds = config.account.credentials().unwrap();
        assert_eq!(creds.username, "someone");
        assert!(config.account.user_agent.contains("yars"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
        assert!(Config::load_or_default(&path).is_ok());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[options\npage_size = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(Error::TomlParse(_))
        ));
    }

    #[test]
    fn test_partial_credentials() {
        let account = AccountConfig {
            client_id: Some("id".into()),
            ..Default::default()
        };
        assert!(account.credentials().is_none());
    }
}
