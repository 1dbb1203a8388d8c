// Steam Web API client
// Only used to resolve vanity profile URLs to Steam ID64

use serde::Deserialize;

use super::error::{read_json, UpstreamError};

pub const STEAM_API_BASE: &str = "https://api.steampowered.com";

/// `success` value Steam uses for "no match"
const VANITY_NO_MATCH: i64 = 42;

pub struct SteamClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl SteamClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Resolve `steamcommunity.com/id/<handle>` to a Steam ID64
    pub async fn resolve_vanity_url(&self, handle: &str) -> Result<String, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredentials("STEAM_API_KEY"))?;

        let response = self
            .client
            .get(format!("{}/ISteamUser/ResolveVanityURL/v0001/", STEAM_API_BASE))
            .query(&[("key", api_key), ("vanityurl", handle)])
            .send()
            .await?;

        let envelope: VanityEnvelope = read_json(response).await?;
        envelope.response.into_steam_id()
    }
}

// Response structures
#[derive(Debug, Deserialize)]
struct VanityEnvelope {
    response: VanityResponse,
}

#[derive(Debug, Deserialize)]
struct VanityResponse {
    success: i64,
    steamid: Option<String>,
    message: Option<String>,
}

impl VanityResponse {
    fn into_steam_id(self) -> Result<String, UpstreamError> {
        match (self.success, self.steamid) {
            (1, Some(steam_id)) if !steam_id.is_empty() => Ok(steam_id),
            (VANITY_NO_MATCH, _) => Err(UpstreamError::NotFound),
            (code, _) => Err(UpstreamError::Decode(format!(
                "ResolveVanityURL success={} ({})",
                code,
                self.message.unwrap_or_default()
            ))),
        }
    }
}
