// FACEIT Scout
// A lightweight Discord bot for looking up FACEIT CS2 player stats

mod api;
mod commands;
mod features;
mod models;
mod utils;

#[cfg(test)]
mod test_utils;

use std::env;
use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::faceit::FaceitClient;
use crate::api::steam::SteamClient;
use crate::api::HttpUpstream;
use crate::utils::config::Config;
use crate::utils::kv_store::{KeyValueStore, MemoryStore};

/// User data shared across all commands
pub struct Data {
    pub upstream: HttpUpstream,
    pub store: Arc<dyn KeyValueStore>,
    pub config: Config,
}

// Manual Debug impl so API keys never end up in logs
impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("upstream", &"HttpUpstream")
            .field("store", &"KeyValueStore")
            .field("default_match_limit", &self.config.default_match_limit)
            .finish()
    }
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::faceit::faceit(),
        commands::history::history(),
        commands::help::help(),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "faceit_scout=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    info!("Starting FACEIT Scout...");

    if config.faceit_api_key.is_none() {
        warn!("FACEIT_API_KEY is not set; FACEIT requests will be rejected");
    }
    if config.steam_api_key.is_none() {
        warn!("STEAM_API_KEY is not set; vanity profile URLs cannot be resolved");
    }

    // Build HTTP client for API calls
    let http_client = reqwest::Client::builder()
        .user_agent("FACEIT-Scout/0.1")
        .timeout(config.http_timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let upstream = HttpUpstream {
        faceit: FaceitClient::new(
            http_client.clone(),
            config.faceit_api_base.clone(),
            config.faceit_api_key.clone(),
        ),
        steam: SteamClient::new(http_client, config.steam_api_key.clone()),
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let token = config.discord_token.clone();

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("f!".into()),
                ..Default::default()
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("❌ Error: {}", error)).await;
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready! Registering commands...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                Ok(Data {
                    upstream,
                    store,
                    config,
                })
            })
        })
        .build();

    // Prefix commands need MESSAGE_CONTENT, which is privileged; slash commands work without it
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create client")?;

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");

    Ok(())
}
