// Stats aggregation
// Fetches profile, lifetime and recent matches for a resolved player and
// folds the recent window into summary rates.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::LookupError;
use crate::api::StatsUpstream;
use crate::models::player::CanonicalPlayerId;
use crate::models::stats::{
    Adr, AggregatedRecentStats, LifetimeStats, MatchRecord, PlayerStatsBundle,
};
use crate::utils::config::DEFAULT_LANGUAGE;
use crate::utils::stat_value::{find_label, first_present, lookup, parse_stat_number, stat_number, value_text};

const LANG_PLACEHOLDER: &str = "{lang}";

/// Label aliases, highest priority first
mod labels {
    pub const KILLS: &[&str] = &["Kills"];
    pub const DEATHS: &[&str] = &["Deaths"];
    pub const RESULT: &[&str] = &["Result"];
    pub const ROUNDS: &[&str] = &["Rounds"];
    pub const ADR: &[&str] = &["ADR"];
    pub const DAMAGE: &[&str] = &["Damage"];
    pub const HEADSHOTS: &[&str] = &["Headshots"];
    pub const HEADSHOT_PERCENT: &[&str] = &["Headshots %"];

    pub const LIFETIME_ADR: &[&str] = &[
        "Average Damage per Round",
        "Average Damage",
        "ADR",
        "Average Damage/Round",
    ];
}

/// Running sums over a match window
#[derive(Debug, Default)]
struct Totals {
    matches: usize,
    with_stats: usize,
    wins: usize,
    kills: f64,
    deaths: f64,
    headshots: f64,
    headshot_kills: f64,
    damage: f64,
    rounds: f64,
}

impl Totals {
    fn add(&mut self, record: &MatchRecord) {
        self.matches += 1;

        let Some(stats) = record.stats_block() else {
            return;
        };
        self.with_stats += 1;

        let kills = stat_number(stats, labels::KILLS);
        let deaths = stat_number(stats, labels::DEATHS);
        let rounds = stat_number(stats, labels::ROUNDS);
        let adr = stat_number(stats, labels::ADR);
        let damage = stat_number(stats, labels::DAMAGE);

        if first_present(stats, labels::RESULT).is_some_and(|(_, v)| is_win(v)) {
            self.wins += 1;
        }

        self.kills += kills;
        self.deaths += deaths;

        if adr > 0.0 && rounds > 0.0 {
            self.damage += adr * rounds;
        } else if damage > 0.0 {
            self.damage += damage;
        }
        self.rounds += if rounds > 0.0 { rounds } else { 1.0 };

        self.headshots += headshots(stats, kills);
        self.headshot_kills += kills;
    }

    fn finish(self) -> AggregatedRecentStats {
        let per_match = |total: f64| {
            if self.with_stats > 0 {
                total / self.with_stats as f64
            } else {
                0.0
            }
        };

        AggregatedRecentStats {
            matches: self.matches,
            wins: self.wins,
            win_rate: if self.matches > 0 {
                self.wins as f64 / self.matches as f64 * 100.0
            } else {
                0.0
            },
            kd: if self.deaths > 0.0 {
                self.kills / self.deaths
            } else {
                self.kills
            },
            headshot_percent: if self.headshot_kills > 0.0 {
                self.headshots / self.headshot_kills * 100.0
            } else {
                0.0
            },
            avg_damage_per_round: if self.rounds > 0.0 {
                self.damage / self.rounds
            } else {
                0.0
            },
            avg_kills: per_match(self.kills),
            avg_deaths: per_match(self.deaths),
        }
    }
}

/// A record is a win only when Result is exactly 1 / "1"
fn is_win(result: &Value) -> bool {
    match result {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Headshot count for one record
fn headshots(stats: &Map<String, Value>, kills: f64) -> f64 {
    if let Some(percent) = lookup(stats, labels::HEADSHOT_PERCENT) {
        return kills * parse_stat_number(percent) / 100.0;
    }

    match first_present(stats, labels::HEADSHOTS) {
        Some((_, raw)) if value_text(raw).contains('%') => kills * parse_stat_number(raw) / 100.0,
        Some((_, raw)) => parse_stat_number(raw),
        None => 0.0,
    }
}

/// Fold a match window into summary rates. Pure; safe on an empty slice.
pub fn aggregate_matches(records: &[MatchRecord]) -> AggregatedRecentStats {
    let mut totals = Totals::default();
    for record in records {
        totals.add(record);
    }
    totals.finish()
}

/// Lifetime ADR under the first known label, passed through as-is
pub fn lifetime_adr(lifetime: &LifetimeStats) -> Option<String> {
    let map = lifetime.as_map();

    first_present(map, labels::LIFETIME_ADR)
        .or_else(|| {
            find_label(map, |label| {
                let label = label.to_lowercase();
                label.contains("damage") && (label.contains("round") || label.contains("adr"))
            })
        })
        .map(|(_, value)| value_text(value).into_owned())
}

/// Lifetime ADR if present, else the recent-window ADR when there is one
pub fn resolve_adr(lifetime: &LifetimeStats, recent: &AggregatedRecentStats) -> Option<Adr> {
    match lifetime_adr(lifetime) {
        Some(value) => Some(Adr::Lifetime(value)),
        None if recent.matches > 0 => Some(Adr::RecentMatches(recent.avg_damage_per_round)),
        None => None,
    }
}

/// Profile link with the locale placeholder filled in
pub fn profile_url(faceit_url: &str, nickname: &str) -> String {
    let url = if faceit_url.trim().is_empty() {
        format!("https://www.faceit.com/{}/players/{}", DEFAULT_LANGUAGE, nickname)
    } else {
        faceit_url.to_string()
    };

    url.replacen(LANG_PLACEHOLDER, DEFAULT_LANGUAGE, 1)
}

/// Primary endpoint, then the history fallback, then nothing.
/// Recent matches are enrichment; failures never reach the caller.
async fn fetch_recent_matches<U: StatsUpstream>(
    upstream: &U,
    player_id: &CanonicalPlayerId,
    limit: u32,
) -> Vec<MatchRecord> {
    if limit == 0 {
        return Vec::new();
    }

    match upstream.fetch_recent_match_stats(player_id, limit).await {
        Ok(records) => return records,
        Err(e) => warn!("Recent match stats failed for {}: {}", player_id, e),
    }

    match upstream.fetch_match_history(player_id, limit).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Match history fallback failed for {}: {}", player_id, e);
            Vec::new()
        }
    }
}

/// Build the full stats bundle for a resolved player
pub async fn aggregate<U: StatsUpstream>(
    upstream: &U,
    player_id: &CanonicalPlayerId,
    recent_match_limit: u32,
) -> Result<PlayerStatsBundle, LookupError> {
    let (mut player, lifetime) = tokio::try_join!(
        upstream.fetch_profile(player_id),
        upstream.fetch_lifetime_stats(player_id),
    )?;

    let recent_raw = fetch_recent_matches(upstream, player_id, recent_match_limit).await;
    debug!("Fetched {} recent matches for {}", recent_raw.len(), player_id);

    player.faceit_url = profile_url(&player.faceit_url, &player.nickname);

    let recent_aggregated = aggregate_matches(&recent_raw);
    let adr = resolve_adr(&lifetime.lifetime, &recent_aggregated);

    Ok(PlayerStatsBundle {
        player,
        lifetime: lifetime.lifetime,
        segments: lifetime.segments,
        recent_aggregated,
        recent_raw,
        adr,
    })
}
