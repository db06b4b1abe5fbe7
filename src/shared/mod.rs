//! Shared Module
//!
//! Types used across the console: the admin API data model, configuration
//! and the error taxonomy. Everything here is plain data and serializes with
//! serde, matching the JSON the homeserver speaks.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Admin API resource types
pub mod admin;

/// Re-export commonly used types for convenience
pub use admin::{Account, FederationPeer, MediaItem, Page, PeerStatus, Room, ServerStats};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{AdminError, ErrorKind};
