//! Shared Error Types
//!
//! This module defines the error taxonomy used by the admin API client and
//! carried through the data context.
//!
//! # Error Categories
//!
//! - `AuthRequired` - an operation was attempted before a credential was set
//! - `Transport` - connection, DNS or timeout failure
//! - `Service` - the homeserver answered with a non-success status
//! - `Decode` - a success response did not match the expected shape
//! - `InvalidConfig` - the client could not be built from its configuration
//! - `InvalidInput` - an identifier cannot be addressed as a path segment
//! - `Cancelled` - the view that started the operation went away
//!
//! # Usage
//!
//! ```rust
//! use synadmin::shared::error::{AdminError, ErrorKind};
//!
//! let error = AdminError::service(404, Some("M_NOT_FOUND".into()), "User not found");
//! assert_eq!(error.kind(), ErrorKind::Service);
//! assert_eq!(error.user_message(), "User not found (404)");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::config::ConfigError;

/// Errors produced by the admin API client and the data context
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdminError {
    /// No bearer credential has been set on the client
    #[error("Authentication required")]
    AuthRequired,

    /// Network-level failure before a response was received
    #[error("Network error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
        /// Whether the request timed out
        timeout: bool,
    },

    /// The homeserver returned a non-2xx response
    #[error("Service error {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Matrix error code (`M_NOT_FOUND`, `M_FORBIDDEN`, ...) when present
        errcode: Option<String>,
        /// Message reported by the homeserver
        message: String,
    },

    /// A 2xx response body could not be decoded
    #[error("Failed to parse response: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },

    /// Client configuration is invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message
        message: String,
    },

    /// An identifier that cannot be sent as a single path segment
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable error message
        message: String,
    },

    /// The scope that started the operation was cancelled
    #[error("Operation cancelled")]
    Cancelled,
}

/// Copyable discriminant of [`AdminError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthRequired,
    Transport,
    Service,
    Decode,
    InvalidConfig,
    InvalidInput,
    Cancelled,
}

impl AdminError {
    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    /// Create a new service error
    pub fn service(status: u16, errcode: Option<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            errcode,
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRequired => ErrorKind::AuthRequired,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP status for service errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Text shown to an operator for this failure
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Authentication required".to_string(),
            Self::Transport { timeout: true, .. } => "Request timed out".to_string(),
            Self::Transport { message, .. } => format!("Network error: {}", message),
            Self::Service { status, message, .. } => format!("{} ({})", message, status),
            Self::Decode { message } => format!("Unexpected response: {}", message),
            Self::InvalidConfig { message } => format!("Invalid configuration: {}", message),
            Self::InvalidInput { message } => message.clone(),
            Self::Cancelled => "Operation cancelled".to_string(),
        }
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        Self::Transport {
            timeout: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<ConfigError> for AdminError {
    fn from(err: ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}
