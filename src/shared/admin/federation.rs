//! Federation Peer Data Structure

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connectivity of a remote server
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeerStatus {
    Online,
    Offline,
    Unreachable,
}

impl fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerStatus::Online => write!(f, "Online"),
            PeerStatus::Offline => write!(f, "Offline"),
            PeerStatus::Unreachable => write!(f, "Unreachable"),
        }
    }
}

/// A remote server the homeserver federates with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FederationPeer {
    pub server_name: String,
    pub status: PeerStatus,
    /// Last successful contact, milliseconds since the epoch
    #[serde(default)]
    pub last_successful_connection: i64,
}

/// Response type for listing federation peers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListPeersResponse {
    pub servers: Vec<FederationPeer>,
}

/// Body of `PUT /v1/federation/servers/{name}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetPeerBlockedRequest {
    pub blocked: bool,
}
