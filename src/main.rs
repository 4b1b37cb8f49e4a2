// Greeter Bot - Rust Edition
// A lightweight Discord bot that welcomes and farewells server members

mod api;
mod commands;
mod features;
mod models;
mod utils;

use std::env;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::guild_store::GuildStore;
use crate::utils::config::{BotSettings, DEFAULT_LOG_FILTER};

/// User data shared across all commands and events
#[derive(Debug)]
pub struct Data {
    pub store: GuildStore,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::greet::set_welcome_channel(),
        commands::greet::set_goodbye_channel(),
        commands::greet::set_welcome_message(),
        commands::greet::set_goodbye_message(),
        commands::greet::set_welcome_image(),
        commands::greet::set_goodbye_image(),
        commands::greet::set_welcome_color(),
        commands::greet::set_goodbye_color(),
        commands::greet::test_greet(),
        commands::greet::test_goodbye(),
        commands::config::config(),
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
            env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = BotSettings::from_env()?;

    info!("Starting Greeter Bot (Rust Edition)...");

    let store = GuildStore::load(&settings.config_path)
        .await
        .context("Failed to load guild config")?;
    // Fail now rather than on the first admin command if the path isn't writable
    store.persist().await.with_context(|| {
        format!("Guild config file {} is not writable", store.path().display())
    })?;
    info!("Guild config store ready ({} guilds)", store.len().await);

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(features::event_handler::handle_event(ctx, event, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx
                                .send(
                                    poise::CreateReply::default()
                                        .content("❌ Something went wrong running that command.")
                                        .ephemeral(true),
                                )
                                .await;
                        }
                        err => {
                            if let Err(e) = poise::builtins::on_error(err).await {
                                error!("Error while handling error: {:?}", e);
                            }
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

                Ok(Data { store })
            })
        })
        .build();

    // GUILD_MEMBERS is privileged, enable "Server Members Intent" in the Discord Dev Portal
    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(settings.token, intents)
        .framework(framework)
        .await
        .context("Failed to create client")?;

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to register Ctrl+C handler: {:?}", e);
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
