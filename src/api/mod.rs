// Upstream API clients
pub mod error;
pub mod faceit;
pub mod steam;

use std::future::Future;

use crate::models::player::{CanonicalPlayerId, PlayerProfile, PlayerRef};
use crate::models::stats::{LifetimeResponse, MatchRecord};

pub use error::UpstreamError;
use faceit::FaceitClient;
use steam::SteamClient;

/// Everything the lookup pipeline needs from the outside world.
/// Implemented over HTTP in production and by an in-memory fake in tests.
pub trait StatsUpstream: Send + Sync {
    fn lookup_by_platform_id(
        &self,
        steam_id: &str,
    ) -> impl Future<Output = Result<PlayerRef, UpstreamError>> + Send;

    fn lookup_by_nickname(
        &self,
        nickname: &str,
    ) -> impl Future<Output = Result<PlayerRef, UpstreamError>> + Send;

    /// Vanity handle -> Steam ID64
    fn resolve_vanity_handle(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;

    fn fetch_profile(
        &self,
        player_id: &CanonicalPlayerId,
    ) -> impl Future<Output = Result<PlayerProfile, UpstreamError>> + Send;

    fn fetch_lifetime_stats(
        &self,
        player_id: &CanonicalPlayerId,
    ) -> impl Future<Output = Result<LifetimeResponse, UpstreamError>> + Send;

    /// Primary recent-match source
    fn fetch_recent_match_stats(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, UpstreamError>> + Send;

    /// Fallback recent-match source; records carry a different shape
    fn fetch_match_history(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, UpstreamError>> + Send;
}

/// FACEIT + Steam over a shared reqwest client
pub struct HttpUpstream {
    pub faceit: FaceitClient,
    pub steam: SteamClient,
}

impl StatsUpstream for HttpUpstream {
    async fn lookup_by_platform_id(&self, steam_id: &str) -> Result<PlayerRef, UpstreamError> {
        self.faceit.player_by_game_id(steam_id).await
    }

    async fn lookup_by_nickname(&self, nickname: &str) -> Result<PlayerRef, UpstreamError> {
        self.faceit.player_by_nickname(nickname).await
    }

    async fn resolve_vanity_handle(&self, handle: &str) -> Result<String, UpstreamError> {
        self.steam.resolve_vanity_url(handle).await
    }

    async fn fetch_profile(&self, player_id: &CanonicalPlayerId) -> Result<PlayerProfile, UpstreamError> {
        self.faceit.player(player_id).await
    }

    async fn fetch_lifetime_stats(
        &self,
        player_id: &CanonicalPlayerId,
    ) -> Result<LifetimeResponse, UpstreamError> {
        self.faceit.lifetime_stats(player_id).await
    }

    async fn fetch_recent_match_stats(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        self.faceit.game_stats(player_id, limit).await
    }

    async fn fetch_match_history(
        &self,
        player_id: &CanonicalPlayerId,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, UpstreamError> {
        self.faceit.match_history(player_id, limit).await
    }
}
