//! Request ordering for racing fetches.
//!
//! Each fetch takes a ticket from the resource it targets. An outcome, success
//! or failure, only settles when its ticket is newer than the last settled
//! one, so a slow response can neither overwrite data nor report an error
//! over the result of a request issued after it.

use std::collections::HashMap;

use serde::Serialize;

/// Snapshot slots that fetches write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Accounts,
    CurrentAccount,
    Rooms,
    CurrentRoom,
    Stats,
    Media,
    Peers,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    issued: u64,
    committed: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Sequencer {
    counters: HashMap<Resource, Counters>,
}

impl Sequencer {
    /// Take the next ticket for `resource`
    pub(crate) fn issue(&mut self, resource: Resource) -> u64 {
        let counters = self.counters.entry(resource).or_default();
        counters.issued += 1;
        counters.issued
    }

    /// Claim the slot for `ticket`. Returns false when a newer outcome has
    /// already settled.
    pub(crate) fn try_commit(&mut self, resource: Resource, ticket: u64) -> bool {
        let counters = self.counters.entry(resource).or_default();
        if ticket <= counters.committed {
            return false;
        }
        counters.committed = ticket;
        true
    }
}
