// Centralized configuration for the FACEIT Scout bot

use anyhow::{anyhow, Context as _, Result};
use std::time::Duration;

pub const FACEIT_API_BASE: &str = "https://open.faceit.com/data/v4";

/// Game id used for every FACEIT request
pub const GAME_ID: &str = "cs2";

/// Language substituted into `{lang}` profile URLs
pub const DEFAULT_LANGUAGE: &str = "en";

pub const DEFAULT_MATCH_LIMIT: u32 = 30;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Search history entries kept per user
pub const HISTORY_LIMIT: usize = 20;

/// Last search is replayed only within this window (24h)
pub const LAST_SEARCH_MAX_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub faceit_api_key: Option<String>,
    pub steam_api_key: Option<String>,
    pub faceit_api_base: String,
    pub default_match_limit: u32,
    pub http_timeout: Duration,
}

impl Config {
    /// Load from process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN").ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let default_match_limit = match get("DEFAULT_MATCH_LIMIT") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DEFAULT_MATCH_LIMIT is not a number: {}", raw))?,
            None => DEFAULT_MATCH_LIMIT,
        };

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            discord_token,
            faceit_api_key: get("FACEIT_API_KEY"),
            steam_api_key: get("STEAM_API_KEY"),
            faceit_api_base: get("FACEIT_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| FACEIT_API_BASE.to_string()),
            default_match_limit,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Discord embed colors
pub mod colors {
    pub const PRIMARY: u32 = 0xff5500;
    pub const SUCCESS: u32 = 0x2ecc71;
    pub const ERROR: u32 = 0xff0000;
    pub const WARNING: u32 = 0xffa500;
    pub const INFO: u32 = 0x3498db;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let vars = env(&[("DISCORD_TOKEN", "token"), ("FACEIT_API_KEY", " ")]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.faceit_api_key, None);
        assert_eq!(config.steam_api_key, None);
        assert_eq!(config.faceit_api_base, FACEIT_API_BASE);
        assert_eq!(config.default_match_limit, 30);
        assert_eq!(config.http_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let vars = env(&[
            ("DISCORD_TOKEN", "token"),
            ("FACEIT_API_KEY", "faceit-key"),
            ("STEAM_API_KEY", "steam-key"),
            ("FACEIT_API_BASE", "http://localhost:8080/v4/"),
            ("DEFAULT_MATCH_LIMIT", "10"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.faceit_api_key.as_deref(), Some("faceit-key"));
        assert_eq!(config.steam_api_key.as_deref(), Some("steam-key"));
        assert_eq!(config.faceit_api_base, "http://localhost:8080/v4");
        assert_eq!(config.default_match_limit, 10);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_token_and_bad_numbers() {
        let vars = env(&[]);
        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());

        let vars = env(&[("DISCORD_TOKEN", "token"), ("DEFAULT_MATCH_LIMIT", "thirty")]);
        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());
    }
}
