//! Search filters for the list views.
//!
//! Matching is a case-insensitive substring test. An empty or
//! whitespace-only term matches everything.

use crate::shared::admin::{Account, FederationPeer, MediaItem, Room};

fn normalize(term: &str) -> Option<String> {
    let term = term.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

fn contains(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

fn contains_opt(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|f| contains(f, term))
}

fn filter_by<'a, T>(items: &'a [T], term: &str, matches: impl Fn(&T, &str) -> bool) -> Vec<&'a T> {
    match normalize(term) {
        None => items.iter().collect(),
        Some(term) => items.iter().filter(|item| matches(*item, term.as_str())).collect(),
    }
}

/// Match on user id or display name
pub fn filter_accounts<'a>(accounts: &'a [Account], term: &str) -> Vec<&'a Account> {
    filter_by(accounts, term, |a, t| {
        contains(&a.name, t) || contains_opt(a.displayname.as_deref(), t)
    })
}

/// Match on room id, name or canonical alias
pub fn filter_rooms<'a>(rooms: &'a [Room], term: &str) -> Vec<&'a Room> {
    filter_by(rooms, term, |r, t| {
        contains(&r.room_id, t)
            || contains_opt(r.name.as_deref(), t)
            || contains_opt(r.canonical_alias.as_deref(), t)
    })
}

/// Match on media id, upload name or uploader
pub fn filter_media<'a>(media: &'a [MediaItem], term: &str) -> Vec<&'a MediaItem> {
    filter_by(media, term, |m, t| {
        contains(&m.media_id, t) || contains_opt(m.upload_name.as_deref(), t) || contains(&m.user_id, t)
    })
}

pub fn filter_peers<'a>(peers: &'a [FederationPeer], term: &str) -> Vec<&'a FederationPeer> {
    filter_by(peers, term, |p, t| contains(&p.server_name, t))
}
