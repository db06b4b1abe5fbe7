//! Account Data Structure
//!
//! Represents a user account as reported by `/_synapse/admin/v2/users`.

use serde::{Deserialize, Serialize};

/// A user account on the administered homeserver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Fully qualified user id, e.g. `@alice:example.org`
    pub name: String,
    /// Optional display name
    #[serde(default)]
    pub displayname: Option<String>,
    /// Whether the account is a server admin
    #[serde(default)]
    pub is_admin: bool,
    /// Whether the account has been deactivated
    #[serde(default)]
    pub deactivated: bool,
    /// Account type (`bot`, `support`, ...), `None` for regular users
    #[serde(default)]
    pub user_type: Option<String>,
    /// Optional avatar URL (mxc://)
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Creation time, seconds since the epoch
    #[serde(default)]
    pub creation_ts: i64,
}

impl Account {
    /// Get display name or fall back to the user id
    pub fn display_name_or_id(&self) -> &str {
        self.displayname.as_deref().unwrap_or(&self.name)
    }

    /// Localpart of the user id (`alice` for `@alice:example.org`)
    pub fn localpart(&self) -> &str {
        let trimmed = self.name.strip_prefix('@').unwrap_or(&self.name);
        trimmed.split(':').next().unwrap_or(trimmed)
    }
}

/// Response type for listing accounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListAccountsResponse {
    pub users: Vec<Account>,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Body of `PUT /v2/users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAccountRequest {
    pub password: String,
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
}

/// Body of `POST /v2/users/{id}/deactivate`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeactivateAccountRequest {
    /// Also erase the account's messages and profile
    pub erase: bool,
}

/// Turn a localpart into a full user id on `server_name`.
///
/// Already-qualified ids (`@name:server`) are returned unchanged.
pub fn qualify_user_id(user: &str, server_name: &str) -> String {
    let user = user.trim();
    if user.starts_with('@') && user.contains(':') {
        return user.to_string();
    }
    format!("@{}:{}", user.trim_start_matches('@'), server_name)
}
