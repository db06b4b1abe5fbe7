//! JSON fixtures shaped like admin API responses

use serde_json::{json, Value};

pub fn account_json(name: &str, is_admin: bool) -> Value {
    json!({
        "name": name,
        "displayname": null,
        "is_admin": is_admin,
        "deactivated": false,
        "user_type": null,
        "avatar_url": null,
        "creation_ts": 1_700_000_000
    })
}

pub fn users_json(names: &[&str]) -> Value {
    let users: Vec<Value> = names.iter().map(|n| account_json(n, false)).collect();
    json!({ "users": users, "total": names.len() })
}

pub fn room_json(room_id: &str, name: &str) -> Value {
    json!({
        "room_id": room_id,
        "name": name,
        "canonical_alias": null,
        "joined_members": 2,
        "joined_local_members": 1,
        "version": "10",
        "creator": "@a:x",
        "encryption": null,
        "federatable": true,
        "public": false,
        "join_rules": "invite",
        "guest_access": null,
        "history_visibility": "shared",
        "state_events": 12
    })
}

pub fn rooms_json(rooms: &[(&str, &str)]) -> Value {
    let rooms: Vec<Value> = rooms.iter().map(|(id, name)| room_json(id, name)).collect();
    json!({ "rooms": rooms, "total_rooms": rooms.len() })
}

pub fn media_json(ids: &[&str]) -> Value {
    let media: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "media_id": id,
                "upload_name": format!("{id}.png"),
                "created_ts": 1_700_000_000_000_i64,
                "media_type": "image/png",
                "media_length": 2048,
                "user_id": "@a:x",
                "safe_from_quarantine": false
            })
        })
        .collect();
    json!({ "media": media, "total": ids.len() })
}

pub fn peers_json(names: &[&str]) -> Value {
    let servers: Vec<Value> = names
        .iter()
        .map(|n| json!({ "server_name": n, "status": "online", "last_successful_connection": 1_700_000_000_000_i64 }))
        .collect();
    json!({ "servers": servers })
}

pub fn stats_json(total_users: u64) -> Value {
    json!({
        "cpu_average": 12.5,
        "memory_usage": 40.0,
        "uptime": 90_061,
        "connected_servers": 3,
        "total_users": total_users,
        "active_users_30days": 7,
        "total_rooms": 4,
        "daily_messages": 100,
        "database_size": 1_048_576
    })
}
