//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{parse_subreddit, parse_username, Config, Feed};
use crate::error::Result;

/// Reddit media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "yars",
    version,
    about = "Download media posted by Reddit users or in subreddits",
    long_about = "A CLI tool to download images and videos linked from Reddit posts.\n\n\
                  Follows Redgifs, imgur and Reddit gallery links, and skips files whose \
                  content was already saved during the run."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (defaults to ~/.yars.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Hide download progress information.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show information about skipped downloads.
    #[arg(long, global = true)]
    pub show_skipped: bool,

    /// Reddit application client ID.
    #[arg(long, env = "YARS_CLIENT_ID", hide_env_values = true, global = true)]
    pub client_id: Option<String>,

    /// Reddit application client secret.
    #[arg(long, env = "YARS_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Reddit account username.
    #[arg(long, env = "YARS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Reddit account password.
    #[arg(long, env = "YARS_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Download media posted by a user.
    User {
        /// Username, optionally prefixed with u/.
        name: String,

        /// Directory to download into.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download media posted in a subreddit.
    Subreddit {
        /// Subreddit name, optionally prefixed with r/.
        name: String,

        /// Directory to download into.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the version.
    Version,
}

impl Args {
    /// The feed selected by the subcommand, with its name validated.
    /// `None` for commands that download nothing.
    pub fn feed(&self) -> Result<Option<Feed>> {
        match &self.command {
            Command::User { name, .. } => Ok(Some(Feed::User(parse_username(name)?))),
            Command::Subreddit { name, .. } => Ok(Some(Feed::Subreddit(parse_subreddit(name)?))),
            Command::Version => Ok(None),
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Override account settings if provided
        if let Some(client_id) = self.client_id {
            config.account.client_id = Some(client_id);
        }

        if let Some(client_secret) = self.client_secret {
            config.account.client_secret = Some(client_secret);
        }

        if let Some(username) = self.username {
            config.account.username = Some(username);
        }

        if let Some(password) = self.password {
            config.account.password = Some(password);
        }

        // Override options if provided
        match self.command {
            Command::User {
                output: Some(dir), ..
            }
            | Command::Subreddit {
                output: Some(dir), ..
            } => config.options.download_directory = Some(dir),
            _ => {}
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }

        if self.show_skipped {
            config.options.show_skipped_downloads = true;
        }
    }
}
