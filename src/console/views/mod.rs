//! Views
//!
//! Presentation helpers shared by every front end: search filters, value
//! formatters and plain-text tables built from snapshot data.

pub mod filter;
pub mod format;

use crate::shared::admin::{Account, FederationPeer, MediaItem, Room, ServerStats};

pub use filter::{filter_accounts, filter_media, filter_peers, filter_rooms};
pub use format::{
    format_bytes, format_date, format_datetime_millis, format_number, format_percent, format_size,
    format_uptime,
};

/// A table ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the table when there are no rows
    pub empty_message: &'static str,
}

impl Table {
    fn new(headers: Vec<&'static str>, empty_message: &'static str) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Left-aligned columns separated by two spaces
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return self.empty_message.to_string();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.headers.iter().map(|h| h.to_uppercase()).collect();
        push_line(&mut out, &header, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn accounts_table(accounts: &[&Account]) -> Table {
    let mut table = Table::new(
        vec!["User ID", "Display Name", "Status", "Admin", "Created"],
        "No users found.",
    );
    table.rows = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                or_dash(a.displayname.as_deref()),
                if a.deactivated { "Deactivated" } else { "Active" }.to_string(),
                if a.is_admin { "Admin" } else { "No" }.to_string(),
                format_date(a.creation_ts),
            ]
        })
        .collect();
    table
}

pub fn rooms_table(rooms: &[&Room]) -> Table {
    let mut table = Table::new(
        vec!["Room ID", "Name", "Alias", "Members", "Version", "Visibility"],
        "No rooms found.",
    );
    table.rows = rooms
        .iter()
        .map(|r| {
            vec![
                r.room_id.clone(),
                or_dash(r.name.as_deref()),
                or_dash(r.canonical_alias.as_deref()),
                format!("{} ({} local)", r.joined_members, r.joined_local_members),
                r.version.clone(),
                if r.public { "Public" } else { "Private" }.to_string(),
            ]
        })
        .collect();
    table
}

pub fn media_table(media: &[&MediaItem]) -> Table {
    let mut table = Table::new(
        vec!["Media ID", "File Name", "Type", "Size", "Uploaded By", "Upload Date", "Status"],
        "No media found.",
    );
    table.rows = media
        .iter()
        .map(|m| {
            vec![
                m.media_id.clone(),
                or_dash(m.upload_name.as_deref()),
                m.media_type.clone(),
                format_bytes(m.media_length),
                m.user_id.clone(),
                format_datetime_millis(m.created_ts),
                if m.safe_from_quarantine { "Safe" } else { "Not Reviewed" }.to_string(),
            ]
        })
        .collect();
    table
}

pub fn peers_table(peers: &[&FederationPeer]) -> Table {
    let mut table = Table::new(
        vec!["Server Name", "Status", "Last Connection"],
        "No federated servers found.",
    );
    table.rows = peers
        .iter()
        .map(|p| {
            let last = if p.last_successful_connection > 0 {
                format_datetime_millis(p.last_successful_connection)
            } else {
                "Never".to_string()
            };
            vec![p.server_name.clone(), p.status.to_string(), last]
        })
        .collect();
    table
}

/// Label/value pairs for the statistics panel
pub fn stats_panel(stats: &ServerStats) -> Vec<(&'static str, String)> {
    vec![
        ("CPU Usage", format_percent(stats.cpu_average)),
        ("Memory Usage", format_percent(stats.memory_usage)),
        ("Uptime", format_uptime(stats.uptime)),
        ("Users", format_number(stats.total_users)),
        ("Active (30 days)", format_number(stats.active_users_30days)),
        ("Rooms", format_number(stats.total_rooms)),
        ("Daily Messages", format_number(stats.daily_messages)),
        ("Database Size", format_size(stats.database_size)),
        ("Connected Servers", format_number(stats.connected_servers)),
    ]
}

/// Render the stats panel as aligned `label: value` lines
pub fn render_stats(stats: &ServerStats) -> String {
    let panel = stats_panel(stats);
    let width = panel.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    panel
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}\n", format!("{label}:"), value, width = width + 1))
        .collect()
}
