// Identity resolution
// Free-text query -> FACEIT player id
//
// Stages run in order and each returns Found / NotFound / Error
// (`Ok(Some)`, `Ok(None)`, `Err`):
//   1. 17-digit Steam ID anywhere in the input
//   2. steamcommunity.com/profiles/<digits>
//   3. steamcommunity.com/id/<handle>, resolved through Steam
//   4. Steam ID -> FACEIT lookup, or the whole input as a nickname

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use std::borrow::Cow;
use tracing::{debug, warn};

use super::error::{LookupError, NotFoundStage};
use crate::api::{StatsUpstream, UpstreamError};
use crate::models::player::{CanonicalPlayerId, PlatformIdentifier};

pub const STEAM_ID_LEN: usize = 17;
pub const STEAM_COMMUNITY_HOST: &str = "steamcommunity.com";

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// A recognised Steam community URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SteamUrl {
    /// `/profiles/<digits>`
    Profile(String),
    /// `/id/<handle>`
    Vanity(String),
}

/// First standalone run of exactly 17 digits
pub fn extract_direct_id(input: &str) -> Option<String> {
    DIGIT_RUN
        .find_iter(input)
        .map(|m| m.as_str())
        .find(|run| run.len() == STEAM_ID_LEN)
        .map(str::to_string)
}

/// Parse a Steam community profile URL; the scheme is optional
pub fn parse_steam_url(input: &str) -> Option<SteamUrl> {
    let candidate: Cow<str> = if input.starts_with("http://") || input.starts_with("https://") {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("https://{}", input))
    };

    let url = Url::parse(&candidate).ok()?;
    let host = url.host_str()?;
    let subdomain = format!(".{}", STEAM_COMMUNITY_HOST);
    if host != STEAM_COMMUNITY_HOST && !host.ends_with(&subdomain) {
        return None;
    }

    let segments: Vec<&str> = url
        .path()
        .trim_end_matches('/')
        .split('/')
        .skip(1)
        .collect();

    match segments.as_slice() {
        ["profiles", id] if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
            Some(SteamUrl::Profile(id.to_string()))
        }
        ["id", handle] if !handle.is_empty() => Some(SteamUrl::Vanity(handle.to_string())),
        _ => None,
    }
}

/// Pull a Steam ID or vanity handle out of the input, if any.
/// A direct 17-digit match wins over anything found in a URL path.
pub fn extract_platform_identifier(input: &str) -> Option<PlatformIdentifier> {
    let direct = extract_direct_id(input);
    let from_url = parse_steam_url(input);

    match (direct, from_url) {
        (Some(id), Some(SteamUrl::Profile(url_id))) if url_id != id => {
            warn!(
                "Steam ID in text ({}) disagrees with profile URL ({}), using the former",
                id, url_id
            );
            Some(PlatformIdentifier::SteamId(id))
        }
        (Some(id), _) => Some(PlatformIdentifier::SteamId(id)),
        (None, Some(SteamUrl::Profile(id))) => Some(PlatformIdentifier::SteamId(id)),
        (None, Some(SteamUrl::Vanity(handle))) => Some(PlatformIdentifier::Vanity(handle)),
        (None, None) => None,
    }
}

/// Vanity handle -> Steam ID.
/// Misses fall through to nickname search; credential problems do not.
async fn resolve_vanity<U: StatsUpstream>(
    upstream: &U,
    handle: &str,
) -> Result<Option<String>, LookupError> {
    match upstream.resolve_vanity_handle(handle).await {
        Ok(steam_id) => {
            debug!("Resolved vanity {} -> {}", handle, steam_id);
            Ok(Some(steam_id))
        }
        Err(e) if e.is_auth() => Err(e.into()),
        Err(UpstreamError::NotFound) => {
            debug!("Vanity handle {} not found, falling back to nickname", handle);
            Ok(None)
        }
        Err(e) => {
            warn!("Vanity resolution for {} failed: {}", handle, e);
            Ok(None)
        }
    }
}

async fn lookup_by_steam_id<U: StatsUpstream>(
    upstream: &U,
    steam_id: &str,
) -> Result<Option<CanonicalPlayerId>, LookupError> {
    match upstream.lookup_by_platform_id(steam_id).await {
        Ok(player) => Ok(player.canonical_id()),
        Err(UpstreamError::NotFound) => Err(LookupError::NotFound(NotFoundStage::PlatformId)),
        Err(e) => Err(e.into()),
    }
}

async fn lookup_by_nickname<U: StatsUpstream>(
    upstream: &U,
    nickname: &str,
) -> Result<Option<CanonicalPlayerId>, LookupError> {
    match upstream.lookup_by_nickname(nickname).await {
        Ok(player) => Ok(player.canonical_id()),
        Err(UpstreamError::NotFound) => Err(LookupError::NotFound(NotFoundStage::Nickname)),
        Err(e) => Err(e.into()),
    }
}

/// Resolve raw user input to a FACEIT player id. No retries.
pub async fn resolve<U: StatsUpstream>(
    upstream: &U,
    raw_query: &str,
) -> Result<CanonicalPlayerId, LookupError> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Err(LookupError::InvalidInput(
            "Enter a FACEIT nickname, Steam ID or Steam profile link".to_string(),
        ));
    }

    let steam_id = match extract_platform_identifier(query) {
        Some(PlatformIdentifier::SteamId(id)) => Some(id),
        Some(PlatformIdentifier::Vanity(handle)) => resolve_vanity(upstream, &handle).await?,
        None => None,
    };

    let player_id = match steam_id {
        Some(id) => lookup_by_steam_id(upstream, &id).await?,
        None => lookup_by_nickname(upstream, query).await?,
    };

    player_id.ok_or(LookupError::NotFound(NotFoundStage::Generic))
}
