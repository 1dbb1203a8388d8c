// FACEIT Data API v4 client
// For player lookup, profiles, lifetime stats and recent matches

use serde::Deserialize;
use tracing::debug;

use super::error::{read_json, UpstreamError};
use crate::models::player::{CanonicalPlayerId, PlayerProfile, PlayerRef};
use crate::models::stats::{LifetimeResponse, MatchRecord};
use crate::utils::config::GAME_ID;

pub struct FaceitClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FaceitClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// GET with bearer auth when a key is configured.
    /// Without a key FACEIT answers 401, which surfaces as an auth error.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));

        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Find a player by their Steam ID64
    pub async fn player_by_game_id(&self, steam_id: &str) -> Result<PlayerRef, UpstreamError> {
        debug!("FACEIT lookup by game_player_id {}", steam_id);

        let response = self
            .get("/players")
            .query(&[("game", GAME_ID), ("game_player_id", steam_id)])
            .send()
            .await?;

        read_json(response).await
    }

    /// Find a player by FACEIT nickname
    pub async fn player_by_nickname(&self, nickname: &str) -> Result<PlayerRef, UpstreamError> {
        debug!("FACEIT lookup by nickname {:?}", nickname);

        let response = self
            .get("/players")
            .query(&[("nickname", nickname)])
            .send()
            .await?;

        read_json(response).await
    }

    /// Full profile document
    pub async fn player(&self, player_id: &CanonicalPlayerId) -> Result<PlayerProfile, UpstreamError> {
        let response = self
            .get(&format!("/players/{}", player_id))
            .send()
            .await?;

        read_json(response).await
    }

    /// Lifetime stats and segments for the configured game
    pub async fn lifetime_stats(
        &self,
        player_id: &CanonicalPlayerId,
    ) -> Result<LifetimeResponse, UpstreamError> {
        let response = self
            .get(&format!("/players/{}/stats/{}", player_id, GAME_ID))
            .send()
            .await?;

        read_json(response).await
    }

    /// Per-match stats (primary endpoint)
    pub async fn game_stats(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        let response = self
            .get(&format!("/players/{}/games/{}/stats", player_id, GAME_ID))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let page: ItemsPage = read_json(response).await?;
        Ok(page.items)
    }

    /// Match history (fallback endpoint, no per-match stats block)
    pub async fn match_history(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        let response = self
            .get(&format!("/players/{}/history", player_id))
            .query(&[("game", GAME_ID)])
            .query(&[("limit", limit)])
            .send()
            .await?;

        let page: ItemsPage = read_json(response).await?;
        Ok(page.items)
    }
}

// Response structures
#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    items: Vec<MatchRecord>,
}
