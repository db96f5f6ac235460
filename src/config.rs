//! Service configuration
//!
//! Loaded from a JSON file; every field has a default so an empty object
//! `{}` is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::auth::crypto::generate_secret;
use crate::auth::{TokenScheme, DEFAULT_TOKEN_TTL_SECS};
use crate::http_server::HttpServerConfig;
use crate::object_store::DEFAULT_URL_TTL_SECS;

/// Longest signed-URL lifetime accepted (seven days)
pub const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Names of the three tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_login_table")]
    pub login: String,
    #[serde(default = "default_music_table")]
    pub music: String,
    #[serde(default = "default_subscribe_table")]
    pub subscribe: String,
}

fn default_login_table() -> String {
    "login".to_string()
}

fn default_music_table() -> String {
    "music".to_string()
}

fn default_subscribe_table() -> String {
    "subscribe".to_string()
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            login: default_login_table(),
            music: default_music_table(),
            subscribe: default_subscribe_table(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tables: TableNames,

    /// Bucket holding artist images
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Lifetime of signed image URLs
    #[serde(default = "default_url_ttl")]
    pub url_ttl_secs: u64,

    /// Base URL that signed object URLs are rooted at
    #[serde(default = "default_object_base_url")]
    pub object_base_url: String,

    /// URL signing secret; generated per process when absent
    #[serde(default)]
    pub signing_secret: Option<String>,

    #[serde(default)]
    pub token_scheme: TokenScheme,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// JWT secret; generated per process when absent
    #[serde(default)]
    pub token_secret: Option<String>,

    /// Songs file loaded after provisioning
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_bucket() -> String {
    "music-images".to_string()
}

fn default_url_ttl() -> u64 {
    DEFAULT_URL_TTL_SECS
}

fn default_object_base_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            bucket: default_bucket(),
            url_ttl_secs: default_url_ttl(),
            object_base_url: default_object_base_url(),
            signing_secret: None,
            token_scheme: TokenScheme::default(),
            token_ttl_secs: default_token_ttl(),
            token_secret: None,
            seed_file: None,
            log_json: false,
            http: HttpServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        let names = [&self.tables.login, &self.tables.music, &self.tables.subscribe];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid("table names must not be empty".into()));
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(ConfigError::Invalid("table names must be distinct".into()));
        }

        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("bucket must not be empty".into()));
        }
        if self.object_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("object_base_url must not be empty".into()));
        }
        if self.url_ttl_secs == 0 || self.url_ttl_secs > MAX_URL_TTL_SECS {
            return Err(ConfigError::Invalid(format!(
                "url_ttl_secs must be between 1 and {}",
                MAX_URL_TTL_SECS
            )));
        }

        if self.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token_ttl_secs must be > 0".into()));
        }
        self.token_ttl()?;

        for (field, secret) in [
            ("signing_secret", &self.signing_secret),
            ("token_secret", &self.token_secret),
        ] {
            if secret.as_deref().is_some_and(|s| s.is_empty()) {
                return Err(ConfigError::Invalid(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }

    /// Token lifetime as a duration
    pub fn token_ttl(&self) -> ConfigResult<Duration> {
        i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::Invalid("token_ttl_secs is out of range".into()))
    }

    /// Fill absent secrets with random ones
    pub fn with_resolved_secrets(mut self) -> Self {
        if self.signing_secret.is_none() {
            warn!("no signing_secret configured; signed URLs will not survive a restart");
            self.signing_secret = Some(generate_secret());
        }
        if self.token_secret.is_none() && self.token_scheme == TokenScheme::Jwt {
            warn!("no token_secret configured; tokens will not survive a restart");
            self.token_secret = Some(generate_secret());
        }
        self
    }
}
