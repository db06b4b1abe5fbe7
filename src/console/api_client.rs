//! Admin API Client
//!
//! Single point of outbound communication with the homeserver admin API.
//! The client holds the base URL and the current bearer credential and
//! nothing else: no cached results, no retries, no request coalescing.

use reqwest::{Client, Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::console::config::{encode_segment, Config};
use crate::shared::admin::{
    qualify_user_id, Account, CreateAccountRequest, DeactivateAccountRequest, FederationPeer,
    ListAccountsResponse, ListMediaResponse, ListPeersResponse, ListRoomsResponse, Page, Room,
    ServerStats, SetPeerBlockedRequest,
};
use crate::shared::error::AdminError;

/// Matrix error body (`{"errcode": "...", "error": "..."}`)
#[derive(Debug, Deserialize)]
struct MatrixErrorBody {
    errcode: Option<String>,
    error: Option<String>,
}

/// Admin API client
#[derive(Debug)]
pub struct AdminApiClient {
    config: Config,
    client: Client,
    token: RwLock<Option<String>>,
}

impl AdminApiClient {
    /// Create a client for the configured homeserver.
    ///
    /// A token present in the configuration is installed as the credential.
    pub fn new(config: Config) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(config.app().request_timeout)
            .connect_timeout(config.app().connect_timeout)
            .build()
            .map_err(|e| AdminError::invalid_config(format!("cannot build HTTP client: {}", e)))?;
        let token = config.app().access_token.clone();

        Ok(Self {
            config,
            client,
            token: RwLock::new(token),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store a bearer token for all subsequent requests. Any string is
    /// accepted; the homeserver decides whether it is valid.
    pub async fn set_credential(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Forget the credential (logout)
    pub async fn clear_credential(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_credential(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Issue a request against an admin API path and decode the JSON reply.
    ///
    /// Fails with [`AdminError::AuthRequired`] before touching the network
    /// when no credential is set. An empty success body decodes as `null`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AdminError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(AdminError::AuthRequired)?;

        let url = self.config.api_url(path);
        tracing::debug!(%method, %path, "admin request");

        let mut request = self.client.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%method, %path, error = %e, "admin request failed to send");
            AdminError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = service_error(status, &text);
            tracing::warn!(%method, %path, status = status.as_u16(), error = %error, "admin request rejected");
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(AdminError::from)?;
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "admin response did not decode");
            AdminError::from(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    // === Accounts ===

    pub async fn list_accounts(&self, page: Page) -> Result<ListAccountsResponse, AdminError> {
        self.get(&format!("/v2/users?limit={}&from={}", page.limit, page.from))
            .await
    }

    pub async fn get_account(&self, user_id: &str) -> Result<Account, AdminError> {
        self.get(&format!("/v2/users/{}", encode_segment(user_id)?))
            .await
    }

    /// Create (or update) an account. `user` may be a bare localpart, which
    /// is qualified with the homeserver's host name.
    pub async fn create_account(
        &self,
        user: &str,
        password: &str,
        admin: bool,
    ) -> Result<Account, AdminError> {
        let user_id = qualify_user_id(user, self.config.server_name());
        let body = CreateAccountRequest {
            password: password.to_string(),
            admin,
            displayname: None,
        };
        self.request(
            Method::PUT,
            &format!("/v2/users/{}", encode_segment(&user_id)?),
            Some(&body),
        )
        .await
    }

    pub async fn deactivate_account(&self, user_id: &str, erase: bool) -> Result<(), AdminError> {
        let body = DeactivateAccountRequest { erase };
        self.request::<IgnoredAny, _>(
            Method::POST,
            &format!("/v2/users/{}/deactivate", encode_segment(user_id)?),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    // === Rooms ===

    pub async fn list_rooms(&self, page: Page) -> Result<ListRoomsResponse, AdminError> {
        self.get(&format!("/v1/rooms?limit={}&from={}", page.limit, page.from))
            .await
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Room, AdminError> {
        self.get(&format!("/v1/rooms/{}", encode_segment(room_id)?))
            .await
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<(), AdminError> {
        self.request::<IgnoredAny, ()>(
            Method::DELETE,
            &format!("/v1/rooms/{}", encode_segment(room_id)?),
            None,
        )
        .await?;
        Ok(())
    }

    // === Server stats ===

    pub async fn server_stats(&self) -> Result<ServerStats, AdminError> {
        self.get("/v1/statistics").await
    }

    // === Media ===

    pub async fn list_media(&self, page: Page) -> Result<ListMediaResponse, AdminError> {
        self.get(&format!("/v1/media?limit={}&from={}", page.limit, page.from))
            .await
    }

    pub async fn quarantine_media(&self, media_id: &str) -> Result<(), AdminError> {
        self.request::<IgnoredAny, ()>(
            Method::POST,
            &format!("/v1/media/quarantine/{}", encode_segment(media_id)?),
            None,
        )
        .await?;
        Ok(())
    }

    // === Federation ===

    pub async fn list_federation_peers(&self) -> Result<Vec<FederationPeer>, AdminError> {
        let response: ListPeersResponse = self.get("/v1/federation/servers").await?;
        Ok(response.servers)
    }

    pub async fn set_peer_blocked(&self, server_name: &str, blocked: bool) -> Result<(), AdminError> {
        let body = SetPeerBlockedRequest { blocked };
        self.request::<IgnoredAny, _>(
            Method::PUT,
            &format!("/v1/federation/servers/{}", encode_segment(server_name)?),
            Some(&body),
        )
        .await?;
        Ok(())
    }
}

/// Build a service error from a non-2xx response body
fn service_error(status: StatusCode, body: &str) -> AdminError {
    let parsed = serde_json::from_str::<MatrixErrorBody>(body).ok();
    let errcode = parsed.as_ref().and_then(|b| b.errcode.clone());
    let message = parsed
        .and_then(|b| b.error)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
        });
    AdminError::service(status.as_u16(), errcode, message)
}
