// Statistics models for lifetime and recent-match data

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::player::PlayerProfile;

/// Lifetime stats keyed by human-readable label ("Average K/D Ratio", ...).
/// Labels are not stable across players, so callers probe aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifetimeStats(pub Map<String, Value>);

impl LifetimeStats {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Per-map / per-mode block returned next to lifetime stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub stats: Map<String, Value>,
}

/// Map names recognised in segment labels ("de_mirage", "Dust2", ...)
const MAP_NAMES: &[&str] = &[
    "mirage", "dust", "inferno", "ancient", "anubis", "vertigo", "overpass", "nuke", "cache",
    "train",
];

impl Segment {
    /// Per-map segment, as opposed to a mode or other breakdown
    pub fn is_map(&self) -> bool {
        let label = self.label.to_lowercase();
        MAP_NAMES.iter().any(|name| label.contains(name))
    }
}

/// Body of `/players/{id}/stats/{game}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifetimeResponse {
    #[serde(default)]
    pub lifetime: LifetimeStats,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// One row of recent-match history.
/// The primary endpoint nests numbers under `stats`; the history
/// fallback has no `stats` block at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl MatchRecord {
    /// The stats block, only when it is a JSON object
    pub fn stats_block(&self) -> Option<&Map<String, Value>> {
        self.stats.as_ref().and_then(Value::as_object)
    }
}

/// Rates derived from a recent-match window.
/// Values are unrounded; rounding happens at display time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedRecentStats {
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub kd: f64,
    pub headshot_percent: f64,
    pub avg_damage_per_round: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
}

/// Where the displayed ADR came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Adr {
    /// Lifetime label value, passed through unchanged
    Lifetime(String),
    /// Derived from the recent-match window
    RecentMatches(f64),
}

/// Everything the presentation layer needs for one player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatsBundle {
    pub player: PlayerProfile,
    pub lifetime: LifetimeStats,
    pub segments: Vec<Segment>,
    pub recent_aggregated: AggregatedRecentStats,
    pub recent_raw: Vec<MatchRecord>,
    pub adr: Option<Adr>,
}
