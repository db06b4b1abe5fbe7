//! Application configuration module
//!
//! Provides configuration types for the console. Values are layered:
//! defaults, then an optional TOML file, then environment, then whatever the
//! caller sets on the builder last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Default number of rows requested per list page
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
/// Default stats polling period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable holding the homeserver URL
pub const ENV_SERVER_URL: &str = "SYNAPSE_URL";
/// Environment variable holding the admin access token
pub const ENV_ACCESS_TOKEN: &str = "SYNAPSE_ACCESS_TOKEN";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Homeserver base URL, without the admin prefix
    pub server_url: Url,
    /// Admin access token, if known up front
    pub access_token: Option<String>,
    /// Page size for list endpoints
    pub page_limit: u32,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Period of the stats poller
    pub stats_poll_interval: Duration,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Host part of the server URL, used to qualify bare user localparts
    pub fn server_name(&self) -> &str {
        self.server_url.host_str().unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.server_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                self.server_url.scheme()
            )));
        }
        if self.server_url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}' has no host",
                self.server_url
            )));
        }
        if self.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_limit",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.stats_poll_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "stats_poll_interval",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Default location of the config file (`<config dir>/synadmin/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("synadmin").join("config.toml"))
    }
}

/// On-disk representation of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_url: Option<String>,
    access_token: Option<String>,
    page_limit: Option<u32>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    stats_poll_interval_secs: Option<u64>,
}

/// Builder for AppConfig
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    access_token: Option<String>,
    page_limit: Option<u32>,
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    stats_poll_interval: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn stats_poll_interval(mut self, interval: Duration) -> Self {
        self.stats_poll_interval = Some(interval);
        self
    }

    /// Merge values from a TOML file. Values already set on the builder are
    /// overwritten.
    pub fn file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(token) = file.access_token {
            self.access_token = Some(token);
        }
        if let Some(limit) = file.page_limit {
            self.page_limit = Some(limit);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = file.stats_poll_interval_secs {
            self.stats_poll_interval = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Merge `SYNAPSE_URL` and `SYNAPSE_ACCESS_TOKEN` from the environment
    pub fn env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_SERVER_URL) {
            if !url.trim().is_empty() {
                self.server_url = Some(url);
            }
        }
        if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
            if !token.trim().is_empty() {
                self.access_token = Some(token);
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let raw_url = self
            .server_url
            .ok_or(ConfigError::MissingValue("server_url"))?;
        let server_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", raw_url, e)))?;

        let config = AppConfig {
            server_url,
            access_token: self.access_token,
            page_limit: self.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            stats_poll_interval: self.stats_poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
