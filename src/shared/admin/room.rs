//! Room Data Structure

use serde::{Deserialize, Serialize};

/// A room as reported by `/_synapse/admin/v1/rooms`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    /// Room id, e.g. `!abc:example.org`
    pub room_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Canonical alias, e.g. `#general:example.org`
    #[serde(default)]
    pub canonical_alias: Option<String>,
    #[serde(default)]
    pub joined_members: u64,
    #[serde(default)]
    pub joined_local_members: u64,
    /// Room version
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub creator: Option<String>,
    /// Encryption algorithm, `None` for unencrypted rooms
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(default)]
    pub federatable: bool,
    /// Published in the room directory
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub join_rules: Option<String>,
    #[serde(default)]
    pub guest_access: Option<String>,
    #[serde(default)]
    pub history_visibility: Option<String>,
    #[serde(default)]
    pub state_events: u64,
}

impl Room {
    /// Name, then alias, then id
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.canonical_alias.as_deref())
            .unwrap_or(&self.room_id)
    }

    pub fn is_encrypted(&self) -> bool {
        self.encryption.is_some()
    }
}

/// Response type for listing rooms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListRoomsResponse {
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub next_batch: Option<u64>,
    #[serde(default)]
    pub total_rooms: Option<u64>,
}
