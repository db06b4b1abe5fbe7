//! Mock admin API server for integration tests
//!
//! Wraps a wiremock server and builds clients and contexts pointed at it.

use synadmin::console::{encode_segment, AdminApiClient, Config, DataContext, ADMIN_PREFIX};
use synadmin::shared::AppConfig;
use wiremock::MockServer;

/// Token every authenticated test context uses
pub const TEST_TOKEN: &str = "syt_test_token";

pub struct MockAdmin {
    pub server: MockServer,
}

impl MockAdmin {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full request path for an admin API path, e.g. `/v2/users`
    pub fn path(admin_path: &str) -> String {
        format!("{}{}", ADMIN_PREFIX, admin_path)
    }

    /// Server name clients derive from the mock's URI
    pub fn server_name(&self) -> String {
        self.config().server_name().to_string()
    }

    /// Fully qualified user id on the mock server
    pub fn user_id(&self, localpart: &str) -> String {
        format!("@{}:{}", localpart, self.server_name())
    }

    /// Request path for a single user on the mock server
    pub fn user_path(&self, localpart: &str) -> String {
        let id = encode_segment(&self.user_id(localpart)).expect("user ids are valid segments");
        Self::path(&format!("/v2/users/{}", id))
    }

    pub fn config(&self) -> Config {
        Config::with_builder(AppConfig::builder().server_url(self.server.uri()))
            .expect("mock server URI is a valid config")
    }

    /// Client with [`TEST_TOKEN`] installed
    pub async fn client(&self) -> AdminApiClient {
        let client = AdminApiClient::new(self.config()).expect("client builds");
        client.set_credential(TEST_TOKEN).await;
        client
    }

    /// Context with [`TEST_TOKEN`] installed
    pub async fn context(&self) -> DataContext {
        DataContext::new(self.client().await)
    }

    /// Context with no credential
    pub fn anonymous_context(&self) -> DataContext {
        DataContext::from_config(self.config()).expect("context builds")
    }

    /// Number of requests the server has seen so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
