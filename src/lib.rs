//! synadmin - Main Library
//!
//! synadmin is an administration console for Synapse homeservers. It talks to
//! the server's admin API (`/_synapse/admin`) to list and manage user
//! accounts, rooms, uploaded media and federation peers, and to watch server
//! statistics.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no I/O
//!   - Admin API records (accounts, rooms, media, peers, stats)
//!   - Layered configuration
//!   - Error types
//!
//! - **`console`** - The client side of the admin API
//!   - reqwest-based API client with bearer authentication
//!   - Data context holding the latest snapshot of every collection
//!   - Stats poller and view helpers
//!
//! The `synadmin` binary (`src/cli`) is a thin clap front end over `console`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use synadmin::console::{views, Config, DataContext};
//! use synadmin::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::with_builder(
//!     AppConfig::builder()
//!         .server_url("https://matrix.example.org")
//!         .access_token("syt_admin_token"),
//! )?;
//! let ctx = DataContext::from_config(config)?;
//!
//! ctx.fetch_rooms().await?;
//! let rooms = ctx.rooms();
//! println!("{}", views::rooms_table(&views::filter_rooms(&rooms, "general")).render());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - `DataContext` is `Clone + Send + Sync`; clones share one snapshot
//! - The snapshot lock is never held across an `.await`
//! - Background work (post-mutation refreshes, the stats poller) runs on
//!   tokio tasks tied to a `CancelScope`
//!
//! # Error Handling
//!
//! - `AdminError` for everything that talks to the server
//! - `ConfigError` for configuration, converted into `AdminError::InvalidConfig`

/// Shared types and data structures
pub mod shared;

/// Admin API client, data context and views
pub mod console;
