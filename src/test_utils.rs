// In-memory upstream for pipeline tests

use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{StatsUpstream, UpstreamError};
use crate::models::player::{CanonicalPlayerId, PlayerProfile, PlayerRef};
use crate::models::stats::{LifetimeResponse, MatchRecord};

/// Canned answer for one upstream call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    NotFound,
    Unauthorized,
    MissingKey,
    RateLimited,
    Failed(u16),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, UpstreamError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::NotFound => Err(UpstreamError::NotFound),
            Reply::Unauthorized => Err(UpstreamError::Unauthorized(StatusCode::UNAUTHORIZED)),
            Reply::MissingKey => Err(UpstreamError::MissingCredentials("STEAM_API_KEY")),
            Reply::RateLimited => Err(UpstreamError::RateLimited),
            Reply::Failed(code) => Err(UpstreamError::Status {
                status: StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message: None,
            }),
        }
    }
}

/// Fake upstream; unknown ids / nicknames / handles answer NotFound
pub struct FakeUpstream {
    pub steam_ids: HashMap<String, Reply<PlayerRef>>,
    pub nicknames: HashMap<String, Reply<PlayerRef>>,
    pub vanity: HashMap<String, Reply<String>>,
    pub profile: Reply<PlayerProfile>,
    pub lifetime: Reply<LifetimeResponse>,
    pub recent_stats: Reply<Vec<MatchRecord>>,
    pub history: Reply<Vec<MatchRecord>>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            steam_ids: HashMap::new(),
            nicknames: HashMap::new(),
            vanity: HashMap::new(),
            profile: Reply::Ok(PlayerProfile::default()),
            lifetime: Reply::Ok(LifetimeResponse::default()),
            recent_stats: Reply::Ok(Vec::new()),
            history: Reply::Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steam_id(mut self, steam_id: &str, player_id: &str) -> Self {
        self.steam_ids
            .insert(steam_id.to_string(), Reply::Ok(player_ref(player_id)));
        self
    }

    pub fn with_nickname(mut self, nickname: &str, player_id: &str) -> Self {
        self.nicknames
            .insert(nickname.to_string(), Reply::Ok(player_ref(player_id)));
        self
    }

    pub fn with_vanity(mut self, handle: &str, reply: Reply<String>) -> Self {
        self.vanity.insert(handle.to_string(), reply);
        self
    }

    /// Calls made so far, e.g. "nickname:s1mple"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

pub fn player_ref(player_id: &str) -> PlayerRef {
    PlayerRef {
        player_id: Some(player_id.to_string()),
        nickname: None,
    }
}

/// Build a match record from JSON
pub fn record(value: Value) -> MatchRecord {
    serde_json::from_value(value).unwrap()
}

fn keyed<T: Clone>(map: &HashMap<String, Reply<T>>, key: &str) -> Result<T, UpstreamError> {
    map.get(key).unwrap_or(&Reply::NotFound).to_result()
}

impl StatsUpstream for FakeUpstream {
    async fn lookup_by_platform_id(&self, steam_id: &str) -> Result<PlayerRef, UpstreamError> {
        self.record(format!("platform:{}", steam_id));
        keyed(&self.steam_ids, steam_id)
    }

    async fn lookup_by_nickname(&self, nickname: &str) -> Result<PlayerRef, UpstreamError> {
        self.record(format!("nickname:{}", nickname));
        keyed(&self.nicknames, nickname)
    }

    async fn resolve_vanity_handle(&self, handle: &str) -> Result<String, UpstreamError> {
        self.record(format!("vanity:{}", handle));
        keyed(&self.vanity, handle)
    }

    async fn fetch_profile(&self, player_id: &CanonicalPlayerId) -> Result<PlayerProfile, UpstreamError> {
        self.record(format!("profile:{}", player_id));
        self.profile.to_result()
    }

    async fn fetch_lifetime_stats(
        &self,
        player_id: &CanonicalPlayerId,
    ) -> Result<LifetimeResponse, UpstreamError> {
        self.record(format!("lifetime:{}", player_id));
        self.lifetime.to_result()
    }

    async fn fetch_recent_match_stats(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        self.record(format!("recent:{}:{}", player_id, limit));
        self.recent_stats.to_result()
    }

    async fn fetch_match_history(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        self.record(format!("history:{}:{}", player_id, limit));
        self.history.to_result()
    }
}
