//! Environment-backed service configuration, read once at startup.

use std::env;
use std::path::PathBuf;

/// Everything the service needs from its environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds, `NOTEGATE_LISTEN_ADDR`.
    pub listen_addr: String,
    /// Hex Ed25519 public key from the Discord application portal,
    /// `DISCORD_PUBLIC_KEY`.
    pub discord_public_key: String,
    /// Secret shared with the in-world script for position-code tags,
    /// `NOTE_SECRET`.
    pub note_secret: String,
    /// SQLite database path, `NOTEGATE_DB_PATH`.
    pub db_path: PathBuf,
    /// Id of the Gist holding the mirror document, `GIST_ID`.
    pub gist_id: String,
    /// GitHub token with the `gist` scope, `GITHUB_TOKEN`.
    pub github_token: String,
}

/// Errors raised while loading [`Config`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

impl Config {
    /// Load the configuration from the process environment.
    ///
    /// `NOTEGATE_LISTEN_ADDR` and `NOTEGATE_DB_PATH` have defaults;
    /// everything else is required.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] for any absent required value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: env::var("NOTEGATE_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_owned()),
            discord_public_key: require("DISCORD_PUBLIC_KEY")?,
            note_secret: require("NOTE_SECRET")?,
            db_path: env::var("NOTEGATE_DB_PATH")
                .unwrap_or_else(|_| "notes.db".to_owned())
                .into(),
            gist_id: require("GIST_ID")?,
            github_token: require("GITHUB_TOKEN")?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}
