// Lookup entry point
// Raw query -> resolved player -> stats bundle, or a typed error result

use tracing::{error, info};

use super::aggregator;
use super::error::{ErrorKind, ErrorResult, LookupError};
use super::resolver;
use crate::api::StatsUpstream;
use crate::models::stats::PlayerStatsBundle;

async fn lookup<U: StatsUpstream>(
    upstream: &U,
    raw_query: &str,
    recent_match_limit: u32,
) -> Result<PlayerStatsBundle, LookupError> {
    let player_id = resolver::resolve(upstream, raw_query).await?;
    info!("Resolved {:?} -> {}", raw_query.trim(), player_id);

    aggregator::aggregate(upstream, &player_id, recent_match_limit).await
}

/// The single call the presentation layer makes
pub async fn get_player_stats_bundle<U: StatsUpstream>(
    upstream: &U,
    raw_query: &str,
    recent_match_limit: u32,
) -> Result<PlayerStatsBundle, ErrorResult> {
    lookup(upstream, raw_query, recent_match_limit)
        .await
        .map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidInput | ErrorKind::PlayerNotFound => {
                    info!("Lookup for {:?} failed: {}", raw_query.trim(), e)
                }
                _ => error!("Lookup for {:?} failed: {:?}", raw_query.trim(), e),
            }
            ErrorResult::from(e)
        })
}
