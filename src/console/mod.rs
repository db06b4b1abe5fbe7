//! Admin Console Module
//!
//! Everything between the operator and the homeserver's admin API.
//!
//! # Architecture
//!
//! - **`config`** - Admin API URL resolution and identifier encoding
//! - **`api_client`** - Authenticated HTTP client, one method per admin endpoint
//! - **`cancel`** - View-scoped cancellation
//! - **`context`** - Shared snapshot, per-operation status, fetch/mutate operations
//! - **`poller`** - Periodic stats refresh
//! - **`views`** - Filtering, formatting and table rendering
//!
//! # Module Structure
//!
//! ```text
//! console/
//! ├── mod.rs        - Module exports and documentation
//! ├── config.rs     - Admin base URL, path encoding
//! ├── api_client.rs - reqwest client for /_synapse/admin
//! ├── cancel.rs     - CancelScope and drop guard
//! ├── context/      - DataContext, status table, fetch sequencing
//! ├── poller.rs     - StatsPoller
//! └── views/        - Filters, formatters, tables
//! ```

pub mod api_client;
pub mod cancel;
pub mod config;
pub mod context;
pub mod poller;
pub mod views;

// Re-export commonly used types
pub use api_client::AdminApiClient;
pub use cancel::{CancelOnDrop, CancelScope};
pub use config::{encode_segment, Config, ADMIN_PREFIX};
pub use context::{
    Collection, DataContext, ErrorRecord, Mutation, Operation, OperationStatus, RefreshHandle,
    Snapshot,
};
pub use poller::{PollerHandle, StatsPoller};
