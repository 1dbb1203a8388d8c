// Player identity models
// Matches FACEIT Data API v4 player documents

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// FACEIT's own player id (a UUID string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalPlayerId(String);

impl CanonicalPlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CanonicalPlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity-platform key extracted from user input.
/// Exactly one form is carried; a vanity handle still needs resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformIdentifier {
    SteamId(String),
    Vanity(String),
}

/// Result of a FACEIT player search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl PlayerRef {
    /// Canonical id, if the upstream actually returned one
    pub fn canonical_id(&self) -> Option<CanonicalPlayerId> {
        self.player_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(CanonicalPlayerId::new)
    }
}

/// Per-game block of a player profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    #[serde(default)]
    pub faceit_elo: Option<i64>,
    #[serde(default)]
    pub skill_level: Option<i64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub game_player_id: Option<String>,
    #[serde(default)]
    pub game_player_name: Option<String>,
}

/// Player profile document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub steam_id_64: String,
    #[serde(default)]
    pub faceit_url: String,
    #[serde(default)]
    pub games: HashMap<String, GameDetails>,
}

impl PlayerProfile {
    /// Metadata for a single game, e.g. "cs2"
    pub fn game(&self, game: &str) -> Option<&GameDetails> {
        self.games.get(game)
    }

    /// Upper-cased ISO country code
    pub fn country_code(&self) -> Option<String> {
        let code = self.country.trim();
        if code.is_empty() {
            None
        } else {
            Some(code.to_uppercase())
        }
    }

    /// Steam community link for the linked account
    pub fn steam_profile_url(&self) -> Option<String> {
        if self.steam_id_64.is_empty() {
            None
        } else {
            Some(format!(
                "https://steamcommunity.com/profiles/{}",
                self.steam_id_64
            ))
        }
    }
}
