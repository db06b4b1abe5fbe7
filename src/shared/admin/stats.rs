//! Server Statistics

use serde::{Deserialize, Serialize};

/// Aggregate server counters from `/_synapse/admin/v1/statistics`.
///
/// Always replaced wholesale; never merged with a previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerStats {
    /// CPU usage, percent
    pub cpu_average: f64,
    /// Memory usage, percent
    pub memory_usage: f64,
    /// Seconds since start
    pub uptime: u64,
    pub connected_servers: u64,
    pub total_users: u64,
    pub active_users_30days: u64,
    pub total_rooms: u64,
    pub daily_messages: u64,
    /// Bytes
    pub database_size: u64,
}
