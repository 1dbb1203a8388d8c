// Search history models
// Stored as JSON through the key-value store

use serde::{Deserialize, Serialize};

/// A successful lookup remembered for autocomplete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub input: String,
    /// Unix milliseconds
    pub timestamp: i64,
    #[serde(rename = "playerName", default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(rename = "steamId", default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,
}

/// The most recent query, replayed when `/faceit` is used without input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSearch {
    pub input: String,
    #[serde(rename = "matchesLimit")]
    pub matches_limit: u32,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Unix milliseconds
    pub timestamp: i64,
}
