//! Data Context
//!
//! Mediates between views and the [`AdminApiClient`]: holds the most recent
//! snapshot of every collection and exposes fetch and mutate operations that
//! call the client and update the shared snapshot.
//!
//! # Rules
//!
//! - Every fetch replaces its collection wholesale. Nothing is merged.
//! - Each operation has its own status entry (see [`status`]); a running
//!   operation never hides another one's error or loading state.
//! - Results are committed only if the handle's [`CancelScope`] is still live
//!   and no newer fetch of the same resource has committed first.
//! - A successful mutation returns its value together with a
//!   [`RefreshHandle`] for the follow-up fetch. A failed mutation records the
//!   error, returns it, and leaves the snapshot alone.
//!
//! # Example
//!
//! ```rust,no_run
//! use synadmin::console::{Config, DataContext};
//! use synadmin::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::with_builder(AppConfig::builder().server_url("https://hs.example.org"))?;
//! let ctx = DataContext::from_config(config)?;
//! ctx.set_credential("syt_admin_token").await;
//!
//! let (view, _guard) = ctx.scoped();
//! view.fetch_accounts().await?;
//! for account in view.accounts() {
//!     println!("{}", account.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod sequence;
pub mod status;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::console::api_client::AdminApiClient;
use crate::console::cancel::{CancelOnDrop, CancelScope};
use crate::console::config::Config;
use crate::shared::admin::{
    Account, FederationPeer, ListAccountsResponse, ListMediaResponse, ListRoomsResponse,
    MediaItem, Page, Room, ServerStats,
};
use crate::shared::error::AdminError;

pub use sequence::Resource;
use sequence::Sequencer;
pub use status::{ErrorRecord, Operation, OperationStatus, StatusTable};

/// Everything the context currently knows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub rooms: Vec<Room>,
    pub stats: Option<ServerStats>,
    pub media: Vec<MediaItem>,
    pub peers: Vec<FederationPeer>,
    /// Last account fetched with [`DataContext::fetch_account`]
    pub current_account: Option<Account>,
    /// Last room fetched with [`DataContext::fetch_room`]
    pub current_room: Option<Room>,
    pub status: StatusTable,
}

/// Collections that mutations refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Accounts,
    Rooms,
    Media,
    Peers,
}

#[derive(Debug, Default)]
struct ContextState {
    snapshot: Snapshot,
    sequencer: Sequencer,
}

#[derive(Debug)]
struct Shared {
    state: RwLock<ContextState>,
    changes: watch::Sender<u64>,
}

/// Handle to the shared data context. Clones share state; each clone carries
/// its own cancellation scope.
#[derive(Debug, Clone)]
pub struct DataContext {
    client: Arc<AdminApiClient>,
    shared: Arc<Shared>,
    scope: CancelScope,
    page: Page,
}

/// Result of a successful mutation plus the follow-up refresh it started
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh: RefreshHandle,
}

/// Handle to the background refetch started after a mutation.
///
/// Dropping the handle detaches the refresh; it still runs to completion.
#[derive(Debug)]
pub struct RefreshHandle {
    collection: Collection,
    scope: CancelScope,
    join: JoinHandle<Result<(), AdminError>>,
}

impl RefreshHandle {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Stop the refresh; its result will not be committed
    pub fn cancel(&self) {
        self.scope.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the refresh to settle
    pub async fn wait(self) -> Result<(), AdminError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(AdminError::Cancelled),
        }
    }
}

/// Decrements the in-flight counter of an operation exactly once, even if
/// the operation future is dropped mid-flight.
struct PendingGuard<'a> {
    ctx: &'a DataContext,
    op: Operation,
    settled: bool,
}

impl PendingGuard<'_> {
    fn settle(mut self, state: &mut ContextState) {
        state.snapshot.status.finish(self.op);
        self.settled = true;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.ctx.write_state().snapshot.status.finish(self.op);
            self.ctx.notify();
        }
    }
}

impl DataContext {
    pub fn new(client: AdminApiClient) -> Self {
        let page = Page::new(client.config().app().page_limit, 0);
        let (changes, _) = watch::channel(0);
        Self {
            client: Arc::new(client),
            shared: Arc::new(Shared {
                state: RwLock::new(ContextState::default()),
                changes,
            }),
            scope: CancelScope::new(),
            page,
        }
    }

    pub fn from_config(config: Config) -> Result<Self, AdminError> {
        Ok(Self::new(AdminApiClient::new(config)?))
    }

    pub fn client(&self) -> &AdminApiClient {
        &self.client
    }

    pub async fn set_credential(&self, token: impl Into<String>) {
        self.client.set_credential(token).await;
    }

    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }

    /// Same shared state, different cancellation scope
    pub fn with_scope(&self, scope: CancelScope) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    /// Open a view: a handle under a child scope that is cancelled when the
    /// returned guard is dropped.
    pub fn scoped(&self) -> (Self, CancelOnDrop) {
        let scope = self.scope.child();
        let guard = scope.drop_guard();
        (self.with_scope(scope), guard)
    }

    /// Same shared state, different page for list fetches
    pub fn with_page(&self, page: Page) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Receiver that ticks whenever the snapshot or a status changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.changes.subscribe()
    }

    // === Snapshot access ===

    pub fn snapshot(&self) -> Snapshot {
        self.read_state().snapshot.clone()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.read_state().snapshot.accounts.clone()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.read_state().snapshot.rooms.clone()
    }

    pub fn stats(&self) -> Option<ServerStats> {
        self.read_state().snapshot.stats.clone()
    }

    pub fn media(&self) -> Vec<MediaItem> {
        self.read_state().snapshot.media.clone()
    }

    pub fn peers(&self) -> Vec<FederationPeer> {
        self.read_state().snapshot.peers.clone()
    }

    pub fn current_account(&self) -> Option<Account> {
        self.read_state().snapshot.current_account.clone()
    }

    pub fn current_room(&self) -> Option<Room> {
        self.read_state().snapshot.current_room.clone()
    }

    pub fn status(&self, op: Operation) -> OperationStatus {
        self.read_state().snapshot.status.get(op)
    }

    /// True while any operation is in flight
    pub fn is_loading(&self) -> bool {
        self.read_state().snapshot.status.any_pending()
    }

    /// Message of the most recently recorded error, if it is still current
    pub fn last_error(&self) -> Option<String> {
        self.read_state()
            .snapshot
            .status
            .latest_error()
            .map(|(_, record)| record.message.clone())
    }

    // === Fetches ===

    pub async fn fetch_accounts(&self) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchAccounts,
            Resource::Accounts,
            self.client.list_accounts(self.page),
            |snapshot: &mut Snapshot, response: ListAccountsResponse| {
                snapshot.accounts = response.users
            },
        )
        .await
    }

    pub async fn fetch_account(&self, user_id: &str) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchAccount,
            Resource::CurrentAccount,
            self.client.get_account(user_id),
            |snapshot: &mut Snapshot, account: Account| {
                snapshot.current_account = Some(account)
            },
        )
        .await
    }

    pub async fn fetch_rooms(&self) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchRooms,
            Resource::Rooms,
            self.client.list_rooms(self.page),
            |snapshot: &mut Snapshot, response: ListRoomsResponse| {
                snapshot.rooms = response.rooms
            },
        )
        .await
    }

    pub async fn fetch_room(&self, room_id: &str) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchRoom,
            Resource::CurrentRoom,
            self.client.get_room(room_id),
            |snapshot: &mut Snapshot, room: Room| snapshot.current_room = Some(room),
        )
        .await
    }

    pub async fn fetch_stats(&self) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchStats,
            Resource::Stats,
            self.client.server_stats(),
            |snapshot: &mut Snapshot, stats: ServerStats| snapshot.stats = Some(stats),
        )
        .await
    }

    pub async fn fetch_media(&self) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchMedia,
            Resource::Media,
            self.client.list_media(self.page),
            |snapshot: &mut Snapshot, response: ListMediaResponse| {
                snapshot.media = response.media
            },
        )
        .await
    }

    pub async fn fetch_peers(&self) -> Result<(), AdminError> {
        self.fetch_into(
            Operation::FetchPeers,
            Resource::Peers,
            self.client.list_federation_peers(),
            |snapshot: &mut Snapshot, peers: Vec<FederationPeer>| snapshot.peers = peers,
        )
        .await
    }

    /// Refetch one collection
    pub async fn refresh(&self, collection: Collection) -> Result<(), AdminError> {
        match collection {
            Collection::Accounts => self.fetch_accounts().await,
            Collection::Rooms => self.fetch_rooms().await,
            Collection::Media => self.fetch_media().await,
            Collection::Peers => self.fetch_peers().await,
        }
    }

    // === Mutations ===

    pub async fn create_account(
        &self,
        user: &str,
        password: &str,
        admin: bool,
    ) -> Result<Mutation<Account>, AdminError> {
        let account = self
            .mutate(
                Operation::CreateAccount,
                self.client.create_account(user, password, admin),
            )
            .await?;
        tracing::info!(user_id = %account.name, admin, "account created");
        Ok(self.with_refresh(account, Collection::Accounts))
    }

    pub async fn deactivate_account(
        &self,
        user_id: &str,
        erase: bool,
    ) -> Result<Mutation<()>, AdminError> {
        self.mutate(
            Operation::DeactivateAccount,
            self.client.deactivate_account(user_id, erase),
        )
        .await?;
        tracing::info!(%user_id, erase, "account deactivated");
        Ok(self.with_refresh((), Collection::Accounts))
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<Mutation<()>, AdminError> {
        self.mutate(Operation::DeleteRoom, self.client.delete_room(room_id))
            .await?;
        tracing::info!(%room_id, "room deleted");
        Ok(self.with_refresh((), Collection::Rooms))
    }

    pub async fn quarantine_media(&self, media_id: &str) -> Result<Mutation<()>, AdminError> {
        self.mutate(
            Operation::QuarantineMedia,
            self.client.quarantine_media(media_id),
        )
        .await?;
        tracing::info!(%media_id, "media quarantined");
        Ok(self.with_refresh((), Collection::Media))
    }

    pub async fn set_peer_blocked(
        &self,
        server_name: &str,
        blocked: bool,
    ) -> Result<Mutation<()>, AdminError> {
        self.mutate(
            Operation::SetPeerBlocked,
            self.client.set_peer_blocked(server_name, blocked),
        )
        .await?;
        tracing::info!(%server_name, blocked, "federation block status changed");
        Ok(self.with_refresh((), Collection::Peers))
    }

    // === Internals ===

    fn read_state(&self) -> RwLockReadGuard<'_, ContextState> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ContextState> {
        self.shared
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.shared.changes.send_modify(|version| *version += 1);
    }

    fn begin(&self, op: Operation) -> PendingGuard<'_> {
        self.write_state().snapshot.status.begin(op);
        self.notify();
        PendingGuard {
            ctx: self,
            op,
            settled: false,
        }
    }

    /// Run `call` unless the scope is (or becomes) cancelled first
    async fn guarded<T, F>(&self, call: F) -> Result<T, AdminError>
    where
        F: Future<Output = Result<T, AdminError>>,
    {
        if self.scope.is_cancelled() {
            return Err(AdminError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.scope.cancelled() => Err(AdminError::Cancelled),
            result = call => result,
        }
    }

    fn record_failure(&self, state: &mut ContextState, op: Operation, error: &AdminError) {
        if error.is_cancelled() {
            tracing::debug!(%op, "operation cancelled");
            return;
        }
        let record = state.snapshot.status.record_error(op, error);
        tracing::warn!(%op, kind = ?record.kind, "{}", record.message);
    }

    async fn fetch_into<T, F, A>(
        &self,
        op: Operation,
        resource: Resource,
        call: F,
        apply: A,
    ) -> Result<(), AdminError>
    where
        F: Future<Output = Result<T, AdminError>>,
        A: FnOnce(&mut Snapshot, T),
    {
        let pending = self.begin(op);
        let ticket = self.write_state().sequencer.issue(resource);

        let result = self.guarded(call).await;

        let outcome = {
            let mut state = self.write_state();
            let outcome = match result {
                Ok(_) if self.scope.is_cancelled() => {
                    tracing::debug!(%op, "scope cancelled, dropping result");
                    Err(AdminError::Cancelled)
                }
                Ok(value) => {
                    if state.sequencer.try_commit(resource, ticket) {
                        apply(&mut state.snapshot, value);
                        state.snapshot.status.record_success(op);
                        tracing::debug!(%op, ticket, "snapshot replaced");
                    } else {
                        tracing::debug!(%op, ticket, "newer result already settled, discarding");
                    }
                    Ok(())
                }
                Err(e) if e.is_cancelled() => Err(e),
                Err(e) => {
                    // A newer fetch has settled; its outcome stands.
                    if state.sequencer.try_commit(resource, ticket) {
                        self.record_failure(&mut state, op, &e);
                    } else {
                        tracing::debug!(%op, ticket, error = %e, "stale fetch failed, not recorded");
                    }
                    Err(e)
                }
            };
            pending.settle(&mut state);
            outcome
        };
        self.notify();
        outcome
    }

    async fn mutate<T, F>(&self, op: Operation, call: F) -> Result<T, AdminError>
    where
        F: Future<Output = Result<T, AdminError>>,
    {
        let pending = self.begin(op);
        let result = self.guarded(call).await;

        {
            let mut state = self.write_state();
            match &result {
                Ok(_) => state.snapshot.status.record_success(op),
                Err(e) => self.record_failure(&mut state, op, e),
            }
            pending.settle(&mut state);
        }
        self.notify();
        result
    }

    fn with_refresh<T>(&self, value: T, collection: Collection) -> Mutation<T> {
        let scope = self.scope.child();
        let ctx = self.with_scope(scope.clone());
        let join = tokio::spawn(async move { ctx.refresh(collection).await });
        Mutation {
            value,
            refresh: RefreshHandle {
                collection,
                scope,
                join,
            },
        }
    }
}
