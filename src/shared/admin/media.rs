//! Media Data Structure

use serde::{Deserialize, Serialize};

/// An uploaded media file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub media_id: String,
    /// Original filename, when the uploader supplied one
    #[serde(default)]
    pub upload_name: Option<String>,
    #[serde(default)]
    pub created_ts: i64,
    #[serde(default)]
    pub last_access_ts: Option<i64>,
    /// MIME type
    #[serde(default)]
    pub media_type: String,
    /// Size in bytes
    #[serde(default)]
    pub media_length: u64,
    /// Uploader
    #[serde(default)]
    pub user_id: String,
    /// Protected from quarantine
    #[serde(default)]
    pub safe_from_quarantine: bool,
}

/// Response type for listing media
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListMediaResponse {
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub next_token: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}
