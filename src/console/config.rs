//! Console configuration wrapper.
//!
//! Resolves admin API URLs against the configured homeserver.

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use crate::shared::error::AdminError;

/// Prefix of every admin API path
pub const ADMIN_PREFIX: &str = "/_synapse/admin";

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    pub fn new(app: AppConfig) -> Self {
        Self { app }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::new(builder.build()?))
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Homeserver URL without a trailing slash
    pub fn server_url(&self) -> &str {
        self.app.server_url.as_str().trim_end_matches('/')
    }

    /// Host used to qualify bare localparts
    pub fn server_name(&self) -> &str {
        self.app.server_name()
    }

    /// Base of the admin API, e.g. `https://hs.example.org/_synapse/admin`
    pub fn admin_base(&self) -> String {
        format!("{}{}", self.server_url(), ADMIN_PREFIX)
    }

    /// Get the full URL for an admin API path (`/v2/users`, ...)
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.admin_base(), path)
    }
}

/// Percent-encode an identifier so it forms a single path segment.
///
/// Empty identifiers and the dot-segments `.` and `..` are rejected: URL
/// parsing removes dot-segments even when percent-encoded, so no encoding
/// keeps them addressable.
pub fn encode_segment(id: &str) -> Result<String, AdminError> {
    if matches!(id, "" | "." | "..") {
        return Err(AdminError::invalid_input(format!(
            "'{}' is not a valid identifier",
            id
        )));
    }
    Ok(urlencoding::encode(id).into_owned())
}
