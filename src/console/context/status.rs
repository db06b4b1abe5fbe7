//! Per-operation status tracking.
//!
//! Every data context operation has its own in-flight counter and last
//! error, so unrelated operations running at the same time do not clobber
//! each other's loading or error state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::error::{AdminError, ErrorKind};

/// Operations exposed by the data context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FetchAccounts,
    FetchAccount,
    FetchRooms,
    FetchRoom,
    FetchStats,
    FetchMedia,
    FetchPeers,
    CreateAccount,
    DeactivateAccount,
    DeleteRoom,
    QuarantineMedia,
    SetPeerBlocked,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::FetchAccounts,
        Operation::FetchAccount,
        Operation::FetchRooms,
        Operation::FetchRoom,
        Operation::FetchStats,
        Operation::FetchMedia,
        Operation::FetchPeers,
        Operation::CreateAccount,
        Operation::DeactivateAccount,
        Operation::DeleteRoom,
        Operation::QuarantineMedia,
        Operation::SetPeerBlocked,
    ];

    /// Prefix used when recording a failure of this operation
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchAccounts => "Failed to fetch users",
            Operation::FetchAccount => "Failed to fetch user details",
            Operation::FetchRooms => "Failed to fetch rooms",
            Operation::FetchRoom => "Failed to fetch room details",
            Operation::FetchStats => "Failed to fetch server statistics",
            Operation::FetchMedia => "Failed to fetch media",
            Operation::FetchPeers => "Failed to fetch federation servers",
            Operation::CreateAccount => "Failed to create user",
            Operation::DeactivateAccount => "Failed to deactivate user",
            Operation::DeleteRoom => "Failed to delete room",
            Operation::QuarantineMedia => "Failed to quarantine media",
            Operation::SetPeerBlocked => "Failed to update server block status",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateAccount
                | Operation::DeactivateAccount
                | Operation::DeleteRoom
                | Operation::QuarantineMedia
                | Operation::SetPeerBlocked
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchAccounts => "fetch_accounts",
            Operation::FetchAccount => "fetch_account",
            Operation::FetchRooms => "fetch_rooms",
            Operation::FetchRoom => "fetch_room",
            Operation::FetchStats => "fetch_stats",
            Operation::FetchMedia => "fetch_media",
            Operation::FetchPeers => "fetch_peers",
            Operation::CreateAccount => "create_account",
            Operation::DeactivateAccount => "deactivate_account",
            Operation::DeleteRoom => "delete_room",
            Operation::QuarantineMedia => "quarantine_media",
            Operation::SetPeerBlocked => "set_peer_blocked",
        };
        f.write_str(name)
    }
}

/// A recorded failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    /// Human-readable message shown to the operator
    pub message: String,
    /// HTTP status for service errors
    pub status: Option<u16>,
    pub at: DateTime<Utc>,
    #[serde(skip)]
    order: u64,
}

/// Status of a single operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationStatus {
    /// Number of calls of this operation currently running
    pub in_flight: u32,
    pub last_error: Option<ErrorRecord>,
    pub last_success: Option<DateTime<Utc>>,
}

impl OperationStatus {
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }
}

/// Status of every operation, keyed by operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusTable {
    entries: BTreeMap<Operation, OperationStatus>,
    #[serde(skip)]
    error_counter: u64,
}

impl StatusTable {
    pub fn get(&self, op: Operation) -> OperationStatus {
        self.entries.get(&op).cloned().unwrap_or_default()
    }

    /// True while at least one operation is running
    pub fn any_pending(&self) -> bool {
        self.entries.values().any(OperationStatus::is_pending)
    }

    pub fn pending(&self) -> Vec<Operation> {
        self.entries
            .iter()
            .filter(|(_, status)| status.is_pending())
            .map(|(op, _)| *op)
            .collect()
    }

    /// Most recently recorded error across all operations
    pub fn latest_error(&self) -> Option<(Operation, &ErrorRecord)> {
        self.entries
            .iter()
            .filter_map(|(op, status)| status.last_error.as_ref().map(|e| (*op, e)))
            .max_by_key(|(_, record)| record.order)
    }

    pub(crate) fn begin(&mut self, op: Operation) {
        let entry = self.entries.entry(op).or_default();
        entry.in_flight += 1;
        entry.last_error = None;
    }

    pub(crate) fn finish(&mut self, op: Operation) {
        if let Some(entry) = self.entries.get_mut(&op) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
        }
    }

    pub(crate) fn record_success(&mut self, op: Operation) {
        self.entries.entry(op).or_default().last_success = Some(Utc::now());
    }

    pub(crate) fn record_error(&mut self, op: Operation, error: &AdminError) -> ErrorRecord {
        self.error_counter += 1;
        let record = ErrorRecord {
            kind: error.kind(),
            message: format!("{}: {}", op.failure_message(), error.user_message()),
            status: error.status(),
            at: Utc::now(),
            order: self.error_counter,
        };
        self.entries.entry(op).or_default().last_error = Some(record.clone());
        record
    }
}
