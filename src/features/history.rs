// Per-user search history and last-search replay
// Stored as JSON strings behind the key-value port

use tracing::warn;

use super::resolver::{parse_steam_url, SteamUrl};
use crate::models::history::{LastSearch, SearchHistoryEntry};
use crate::utils::config::{HISTORY_LIMIT, LAST_SEARCH_MAX_AGE_MS};
use crate::utils::kv_store::KeyValueStore;

fn history_key(user_id: u64) -> String {
    format!("faceit_search_history:{}", user_id)
}

fn last_search_key(user_id: u64) -> String {
    format!("faceit_last_search:{}", user_id)
}

/// Newest-first history; unreadable data is treated as empty
pub fn get_history<S: KeyValueStore + ?Sized>(store: &S, user_id: u64) -> Vec<SearchHistoryEntry> {
    parse_history(store.get(&history_key(user_id)).as_deref(), user_id)
}

fn parse_history(raw: Option<&str>, user_id: u64) -> Vec<SearchHistoryEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Discarding unreadable history for {}: {}", user_id, e);
        Vec::new()
    })
}

/// Record a successful lookup: dedupe by input (case-insensitive),
/// put it first, keep the newest 20. Runs as one store update.
pub fn add_to_history<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: u64,
    entry: SearchHistoryEntry,
) {
    let needle = entry.input.to_lowercase();

    store.update(&history_key(user_id), &mut |current| {
        let mut history: Vec<SearchHistoryEntry> = parse_history(current, user_id)
            .into_iter()
            .filter(|item| item.input.to_lowercase() != needle)
            .collect();

        history.insert(0, entry.clone());
        history.truncate(HISTORY_LIMIT);

        match serde_json::to_string(&history) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("Failed to save history for {}: {}", user_id, e);
                None
            }
        }
    });
}

pub fn clear_history<S: KeyValueStore + ?Sized>(store: &S, user_id: u64) {
    store.clear(&history_key(user_id));
}

/// History entries whose input or player name contains `partial`
pub fn suggestions<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: u64,
    partial: &str,
    limit: usize,
) -> Vec<SearchHistoryEntry> {
    let needle = partial.trim().to_lowercase();

    get_history(store, user_id)
        .into_iter()
        .filter(|item| {
            needle.is_empty()
                || item.input.to_lowercase().contains(&needle)
                || item
                    .player_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .take(limit)
        .collect()
}

/// Human-readable label: player name, else the Steam URL's
/// handle / id, else the raw input
pub fn display_name(entry: &SearchHistoryEntry) -> String {
    if let Some(name) = entry.player_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }

    match parse_steam_url(&entry.input) {
        Some(SteamUrl::Vanity(handle)) => handle,
        Some(SteamUrl::Profile(id)) => id,
        None => entry.input.clone(),
    }
}

pub fn save_last_search<S: KeyValueStore + ?Sized>(store: &S, user_id: u64, search: &LastSearch) {
    match serde_json::to_string(search) {
        Ok(raw) => store.set(&last_search_key(user_id), raw),
        Err(e) => warn!("Failed to save last search for {}: {}", user_id, e),
    }
}

/// Last search if younger than 24h; stale or unreadable entries are cleared
pub fn get_last_search<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: u64,
    now_ms: i64,
) -> Option<LastSearch> {
    let key = last_search_key(user_id);
    let raw = store.get(&key)?;

    match serde_json::from_str::<LastSearch>(&raw) {
        Ok(search) if now_ms - search.timestamp <= LAST_SEARCH_MAX_AGE_MS => Some(search),
        Ok(_) => {
            store.clear(&key);
            None
        }
        Err(e) => {
            warn!("Discarding unreadable last search for {}: {}", user_id, e);
            store.clear(&key);
            None
        }
    }
}
