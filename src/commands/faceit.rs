// FACEIT command - look up a CS2 player's stats
// Accepts a Steam ID64, a Steam profile URL or a FACEIT nickname

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::info;

use crate::features::error::{ErrorKind, ErrorResult};
use crate::features::{history, lookup};
use crate::models::history::{LastSearch, SearchHistoryEntry};
use crate::models::stats::{Adr, PlayerStatsBundle, Segment};
use crate::utils::config::{colors, GAME_ID};
use crate::utils::formatters::{format_kd, format_number, format_rate, truncate};
use crate::utils::stat_value::{first_present, value_text};
use crate::utils::thresholds::{format_stat_value, indicator, StatKind};
use crate::{Context, Error};

const SUGGESTION_LIMIT: usize = 25;

/// Discord embed field value limit
const FIELD_LIMIT: usize = 1024;

/// Lifetime labels shown in the embed
const LIFETIME_MATCHES: &[&str] = &["Matches", "Total Matches"];
const LIFETIME_WINS: &[&str] = &["Wins"];
const LIFETIME_WIN_RATE: &[&str] = &["Win Rate %", "Win Rate"];
const LIFETIME_KD: &[&str] = &["Average K/D Ratio", "K/D Ratio"];
const LIFETIME_HEADSHOTS: &[&str] = &["Average Headshots %", "Headshots %"];
const LIFETIME_STREAK: &[&str] = &["Longest Win Streak"];

/// Segment labels summarised per map / mode, in display order
const SEGMENT_SUMMARY: &[(&str, &[&str], &str)] = &[
    ("Matches", &["Matches"], ""),
    ("WR", &["Win Rate %", "Win Rate"], "%"),
    ("K/D", &["Average K/D Ratio", "K/D Ratio"], ""),
    ("HS", &["Average Headshots %", "Headshots %"], "%"),
    ("ADR", &["ADR", "Average Damage per Round", "Average Damage"], ""),
];

/// Size of the recent-match window
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum MatchWindow {
    #[name = "Last 10 matches"]
    Ten,
    #[name = "Last 20 matches"]
    Twenty,
    #[name = "Last 30 matches"]
    Thirty,
}

impl MatchWindow {
    pub fn limit(self) -> u32 {
        match self {
            MatchWindow::Ten => 10,
            MatchWindow::Twenty => 20,
            MatchWindow::Thirty => 30,
        }
    }
}

/// Look up FACEIT CS2 stats by Steam ID, Steam URL or nickname
#[poise::command(slash_command, prefix_command)]
pub async fn faceit(
    ctx: Context<'_>,
    #[description = "Steam ID64, Steam profile URL or FACEIT nickname (empty = last search)"]
    #[autocomplete = "autocomplete_query"]
    query: Option<String>,
    #[description = "How many recent matches to aggregate"]
    matches: Option<MatchWindow>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let user_id = ctx.author().id.get();
    let now = Utc::now().timestamp_millis();
    let store = data.store.as_ref();

    let query = query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    // No input: replay the last search from the past 24h
    let (input, limit) = match query {
        Some(q) => (q, matches.map(MatchWindow::limit).unwrap_or(data.config.default_match_limit)),
        None => match history::get_last_search(store, user_id, now) {
            Some(last) => {
                info!("Replaying last search {:?} for {}", last.input, user_id);
                let limit = matches.map(MatchWindow::limit).unwrap_or(last.matches_limit);
                (last.input, limit)
            }
            None => (String::new(), data.config.default_match_limit),
        },
    };

    match lookup::get_player_stats_bundle(&data.upstream, &input, limit).await {
        Ok(bundle) => {
            let nickname = Some(bundle.player.nickname.clone()).filter(|n| !n.is_empty());
            let steam_id = Some(bundle.player.steam_id_64.clone()).filter(|s| !s.is_empty());

            history::add_to_history(
                store,
                user_id,
                SearchHistoryEntry {
                    input: input.clone(),
                    timestamp: now,
                    player_name: nickname.clone(),
                    steam_id,
                },
            );
            history::save_last_search(
                store,
                user_id,
                &LastSearch {
                    input,
                    matches_limit: limit,
                    nickname,
                    timestamp: now,
                },
            );

            let embed = stats_embed(&bundle, limit).footer(serenity::CreateEmbedFooter::new(
                format!("Requested by {}", ctx.author().name),
            ));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(err) => {
            ctx.send(poise::CreateReply::default().embed(error_embed(&err)))
                .await?;
        }
    }

    Ok(())
}

/// Autocomplete from the caller's search history
async fn autocomplete_query(ctx: Context<'_>, partial: &str) -> impl Iterator<Item = String> {
    let user_id = ctx.author().id.get();

    history::suggestions(ctx.data().store.as_ref(), user_id, partial, SUGGESTION_LIMIT)
        .into_iter()
        .map(|entry| entry.input)
}

/// Regional-indicator flag for a two-letter country code
fn country_flag(code: &str) -> Option<String> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    code.to_ascii_uppercase()
        .chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Lifetime value under the first matching label, as shown upstream
fn lifetime_value(bundle: &PlayerStatsBundle, aliases: &[&str]) -> Option<String> {
    first_present(bundle.lifetime.as_map(), aliases).map(|(_, v)| value_text(v).into_owned())
}

/// "1.12 🟢" style cell; falls back to "N/A"
fn rated(value: Option<String>, kind: StatKind, suffix: &str) -> String {
    match value {
        Some(v) => format!(
            "{}{} {}",
            v,
            suffix,
            indicator(format_stat_value(&v), kind).emoji()
        ),
        None => "N/A".to_string(),
    }
}

fn level_text(bundle: &PlayerStatsBundle) -> String {
    let Some(game) = bundle.player.game(GAME_ID) else {
        return "No CS2 profile".to_string();
    };

    let level = game
        .skill_level
        .map(|l| format!("Level {}", l))
        .unwrap_or_else(|| "Unranked".to_string());

    let mut parts = vec![level];
    if let Some(elo) = game.faceit_elo {
        parts.push(format!(
            "**{}** ELO {}",
            format_number(elo),
            indicator(elo as f64, StatKind::Elo).emoji()
        ));
    }
    if let Some(region) = game.region.as_deref().filter(|r| !r.trim().is_empty()) {
        parts.push(format!("Region {}", region));
    }

    parts.join(" • ")
}

fn lifetime_text(bundle: &PlayerStatsBundle) -> String {
    let mut lines = Vec::new();

    // Counts are shown only when upstream reports them
    if let Some(matches) = lifetime_value(bundle, LIFETIME_MATCHES) {
        lines.push(format!("Matches: **{}**", matches));
    }
    if let Some(wins) = lifetime_value(bundle, LIFETIME_WINS) {
        lines.push(format!("Wins: **{}**", wins));
    }

    lines.extend([
        format!(
            "Win rate: **{}**",
            rated(lifetime_value(bundle, LIFETIME_WIN_RATE), StatKind::WinRate, "%")
        ),
        format!(
            "K/D: **{}**",
            rated(lifetime_value(bundle, LIFETIME_KD), StatKind::Kd, "")
        ),
        format!(
            "Headshots: **{}**",
            rated(lifetime_value(bundle, LIFETIME_HEADSHOTS), StatKind::Headshot, "%")
        ),
    ]);

    if let Some(streak) = lifetime_value(bundle, LIFETIME_STREAK) {
        lines.push(format!("Longest win streak: **{}**", streak));
    }

    lines.join("\n")
}

fn recent_text(bundle: &PlayerStatsBundle) -> String {
    let recent = &bundle.recent_aggregated;
    if recent.matches == 0 {
        return "*No recent matches available*".to_string();
    }

    [
        format!(
            "Record: **{}W / {}L** ({}% {})",
            recent.wins,
            recent.matches - recent.wins,
            format_rate(recent.win_rate),
            indicator(recent.win_rate, StatKind::WinRate).emoji()
        ),
        format!(
            "K/D: **{}** {}",
            format_kd(recent.kd),
            indicator(recent.kd, StatKind::Kd).emoji()
        ),
        format!(
            "Avg kills / deaths: **{} / {}**",
            format_rate(recent.avg_kills),
            format_rate(recent.avg_deaths)
        ),
        format!(
            "Headshots: **{}%** {}",
            format_rate(recent.headshot_percent),
            indicator(recent.headshot_percent, StatKind::Headshot).emoji()
        ),
        format!(
            "ADR: **{}** {}",
            format_rate(recent.avg_damage_per_round),
            indicator(recent.avg_damage_per_round, StatKind::Adr).emoji()
        ),
    ]
    .join("\n")
}

fn adr_text(adr: &Adr) -> String {
    match adr {
        Adr::Lifetime(value) => format!(
            "**{}** {} (lifetime)",
            value,
            indicator(format_stat_value(value), StatKind::Adr).emoji()
        ),
        Adr::RecentMatches(value) => format!(
            "**{}** {} (recent matches)",
            format_rate(*value),
            indicator(*value, StatKind::Adr).emoji()
        ),
    }
}

/// One line per segment: known stats when present, else every stat
fn segment_line(segment: &Segment) -> String {
    let known: Vec<String> = SEGMENT_SUMMARY
        .iter()
        .filter_map(|(name, aliases, suffix)| {
            first_present(&segment.stats, aliases)
                .map(|(_, v)| format!("{} {}{}", name, value_text(v), suffix))
        })
        .collect();

    let summary = if known.is_empty() {
        segment
            .stats
            .iter()
            .map(|(key, v)| format!("{}: {}", key, value_text(v)))
            .collect::<Vec<_>>()
            .join(" • ")
    } else {
        known.join(" • ")
    };

    if summary.is_empty() {
        format!("**{}**", segment.label)
    } else {
        format!("**{}**: {}", segment.label, summary)
    }
}

/// Segment lines for one embed field, or `None` when there are none
fn segments_text<'a>(segments: impl Iterator<Item = &'a Segment>) -> Option<String> {
    let lines: Vec<String> = segments.map(segment_line).collect();
    if lines.is_empty() {
        None
    } else {
        Some(truncate(&lines.join("\n"), FIELD_LIMIT))
    }
}

fn links_text(bundle: &PlayerStatsBundle) -> String {
    let mut links = vec![format!("[FACEIT]({})", bundle.player.faceit_url)];
    if let Some(steam) = bundle.player.steam_profile_url() {
        links.push(format!("[Steam]({})", steam));
    }
    links.join(" • ")
}

/// Stats embed for a resolved player
pub fn stats_embed(bundle: &PlayerStatsBundle, limit: u32) -> serenity::CreateEmbed {
    let player = &bundle.player;
    let flag = player
        .country_code()
        .and_then(|code| country_flag(&code))
        .map(|f| format!("{} ", f))
        .unwrap_or_default();

    let mut embed = serenity::CreateEmbed::new()
        .title(truncate(&format!("{}{}", flag, player.nickname), 256))
        .url(&player.faceit_url)
        .color(colors::PRIMARY)
        .field("🎯 Level", level_text(bundle), false)
        .field("📊 Lifetime", lifetime_text(bundle), true)
        .field(
            format!("🕒 Last {} matches", limit),
            recent_text(bundle),
            true,
        );

    if let Some(adr) = &bundle.adr {
        embed = embed.field("💥 ADR", adr_text(adr), false);
    }

    if let Some(maps) = segments_text(bundle.segments.iter().filter(|s| s.is_map())) {
        embed = embed.field("🗺️ Maps", maps, false);
    }
    if let Some(other) = segments_text(bundle.segments.iter().filter(|s| !s.is_map())) {
        embed = embed.field("📂 Other", other, false);
    }

    embed = embed.field("🔗 Links", links_text(bundle), false);

    if !player.avatar.is_empty() {
        embed = embed.thumbnail(&player.avatar);
    }

    embed
}

/// Error embed, titled by error kind
pub fn error_embed(err: &ErrorResult) -> serenity::CreateEmbed {
    let (title, color) = match err.kind {
        ErrorKind::InvalidInput => ("❓ Invalid input", colors::WARNING),
        ErrorKind::PlayerNotFound => ("🔍 Player not found", colors::WARNING),
        ErrorKind::UpstreamAuth => ("🔒 API authorization error", colors::ERROR),
        ErrorKind::UpstreamRateLimit => ("⏳ Rate limited", colors::WARNING),
        ErrorKind::UpstreamError => ("❌ Lookup failed", colors::ERROR),
    };

    serenity::CreateEmbed::new()
        .title(title)
        .description(truncate(&err.message, 4096))
        .color(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{GameDetails, PlayerProfile};
    use crate::models::stats::{AggregatedRecentStats, LifetimeStats};
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn segment(label: &str, stats: Value) -> Segment {
        Segment {
            label: label.to_string(),
            stats: object(stats),
            ..Default::default()
        }
    }

    fn bundle() -> PlayerStatsBundle {
        let mut player = PlayerProfile {
            player_id: "faceit-1".to_string(),
            nickname: "s1mple".to_string(),
            country: "ua".to_string(),
            steam_id_64: "76561198012345678".to_string(),
            faceit_url: "https://www.faceit.com/en/players/s1mple".to_string(),
            ..Default::default()
        };
        player.games.insert(
            "cs2".to_string(),
            GameDetails {
                faceit_elo: Some(3150),
                skill_level: Some(10),
                region: Some("EU".to_string()),
                ..Default::default()
            },
        );

        let lifetime = LifetimeStats(object(json!({
            "Matches": "1500",
            "Wins": "840",
            "Win Rate %": "56",
            "Average K/D Ratio": "1.31",
            "Average Headshots %": "38",
        })));

        PlayerStatsBundle {
            player,
            lifetime,
            segments: Vec::new(),
            recent_aggregated: AggregatedRecentStats::default(),
            recent_raw: Vec::new(),
            adr: None,
        }
    }

    #[test]
    fn test_match_window_limits() {
        assert_eq!(MatchWindow::Ten.limit(), 10);
        assert_eq!(MatchWindow::Twenty.limit(), 20);
        assert_eq!(MatchWindow::Thirty.limit(), 30);
    }

    #[test]
    fn test_country_flag() {
        assert_eq!(country_flag("UA").as_deref(), Some("🇺🇦"));
        assert_eq!(country_flag("de").as_deref(), Some("🇩🇪"));
        assert_eq!(country_flag("EUR"), None);
        assert_eq!(country_flag("1A"), None);
    }

    #[test]
    fn test_level_text() {
        assert_eq!(level_text(&bundle()), "Level 10 • **3,150** ELO 🟢 • Region EU");

        let mut no_region = bundle();
        if let Some(game) = no_region.player.games.get_mut("cs2") {
            game.region = None;
        }
        assert_eq!(level_text(&no_region), "Level 10 • **3,150** ELO 🟢");

        let mut no_cs2 = bundle();
        no_cs2.player.games.clear();
        assert_eq!(level_text(&no_cs2), "No CS2 profile");
    }

    #[test]
    fn test_lifetime_text() {
        let text = lifetime_text(&bundle());
        assert!(text.contains("Matches: **1500**"));
        assert!(text.contains("Wins: **840**"));
        assert!(text.contains("Win rate: **56% 🟢**"));
        assert!(text.contains("K/D: **1.31 🟢**"));
        assert!(text.contains("Headshots: **38% 🔴**"));
        assert!(!text.contains("streak"));
    }

    #[test]
    fn test_lifetime_text_skips_missing_counts() {
        let mut b = bundle();
        b.lifetime = LifetimeStats(object(json!({ "Average K/D Ratio": "0.9" })));

        let text = lifetime_text(&b);
        assert!(!text.contains("Matches"));
        assert!(!text.contains("Wins"));
        assert!(text.starts_with("Win rate: **N/A**"));
        assert!(text.contains("K/D: **0.9 🔴**"));
    }

    #[test]
    fn test_recent_text() {
        let mut b = bundle();
        assert_eq!(recent_text(&b), "*No recent matches available*");

        b.recent_aggregated = AggregatedRecentStats {
            matches: 4,
            wins: 3,
            win_rate: 75.0,
            kd: 1.0,
            headshot_percent: 47.34,
            avg_damage_per_round: 95.4,
            avg_kills: 20.0,
            avg_deaths: 20.0,
        };
        let text = recent_text(&b);
        assert!(text.contains("Record: **3W / 1L** (75.0% 🟢)"));
        assert!(text.contains("K/D: **1.00** 🟡"));
        assert!(text.contains("Headshots: **47.3%** 🟡"));
        assert!(text.contains("ADR: **95.4** 🟢"));

        // Shown even when the ADR card uses the lifetime value
        b.adr = Some(Adr::Lifetime("70".to_string()));
        assert!(recent_text(&b).contains("ADR: **95.4** 🟢"));
    }

    #[test]
    fn test_segment_line() {
        let mirage = segment(
            "de_mirage",
            json!({ "Matches": "120", "Win Rate %": "58", "Average K/D Ratio": "1.2", "Kills": "2100" }),
        );
        assert_eq!(segment_line(&mirage), "**de_mirage**: Matches 120 • WR 58% • K/D 1.2");

        let other = segment("5v5", json!({ "Clutches": "14", "Aces": 2 }));
        assert_eq!(segment_line(&other), "**5v5**: Clutches: 14 • Aces: 2");

        assert_eq!(segment_line(&segment("empty", json!({}))), "**empty**");
    }

    #[test]
    fn test_segments_split_maps_from_other() {
        let mut b = bundle();
        b.segments = vec![
            segment("de_mirage", json!({ "Matches": "120" })),
            segment("5v5", json!({ "Matches": "900" })),
            segment("de_inferno", json!({ "Matches": "80" })),
        ];

        let maps = segments_text(b.segments.iter().filter(|s| s.is_map()));
        assert_eq!(
            maps.as_deref(),
            Some("**de_mirage**: Matches 120\n**de_inferno**: Matches 80")
        );

        let other = segments_text(b.segments.iter().filter(|s| !s.is_map()));
        assert_eq!(other.as_deref(), Some("**5v5**: Matches 900"));

        assert_eq!(segments_text(std::iter::empty()), None);
    }

    #[test]
    fn test_adr_text() {
        assert_eq!(adr_text(&Adr::Lifetime("88.8".to_string())), "**88.8** 🟢 (lifetime)");
        assert_eq!(adr_text(&Adr::RecentMatches(70.04)), "**70.0** 🔴 (recent matches)");
    }

    #[test]
    fn test_links_text() {
        assert_eq!(
            links_text(&bundle()),
            "[FACEIT](https://www.faceit.com/en/players/s1mple) • \
             [Steam](https://steamcommunity.com/profiles/76561198012345678)"
        );
    }
}
