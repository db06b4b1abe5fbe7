//! Admin API Data Model
//!
//! Records mirrored from the homeserver admin API. Field names follow the
//! wire format (snake_case) so the types deserialize responses directly.
//!
//! - `Account` - a user identity on the homeserver
//! - `Room` - a room known to the homeserver
//! - `MediaItem` - an uploaded media file
//! - `FederationPeer` - a remote server this homeserver federates with
//! - `ServerStats` - aggregate server counters
//!
//! # Usage
//!
//! ```rust
//! use synadmin::shared::admin::{Account, ListAccountsResponse};
//! ```

pub mod account;
pub mod room;
pub mod media;
pub mod federation;
pub mod stats;

pub use account::{
    qualify_user_id, Account, CreateAccountRequest, DeactivateAccountRequest,
    ListAccountsResponse,
};
pub use room::{ListRoomsResponse, Room};
pub use media::{ListMediaResponse, MediaItem};
pub use federation::{FederationPeer, ListPeersResponse, PeerStatus, SetPeerBlockedRequest};
pub use stats::ServerStats;

use serde::{Deserialize, Serialize};

/// Offset pagination accepted by the list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub from: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 100, from: 0 }
    }
}

impl Page {
    pub fn new(limit: u32, from: u64) -> Self {
        Self { limit, from }
    }
}
