// Config command - show the guild's greeting settings

use poise::serenity_prelude as serenity;
use tracing::error;

use crate::models::guild::GuildConfig;
use crate::utils::config::colors;
use crate::{Context, Error};

fn describe_channel(channel_id: Option<u64>) -> String {
    channel_id
        .map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "Not set".to_string())
}

/// Embed listing every greeting setting of a guild
fn config_embed(config: &GuildConfig) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Greeting Configuration")
        .field("Welcome Channel", describe_channel(config.welcome_channel_id), true)
        .field("Goodbye Channel", describe_channel(config.goodbye_channel_id), true)
        .field("Welcome Color", format!("`#{}`", config.welcome_color), true)
        .field("Goodbye Color", format!("`#{}`", config.goodbye_color), true)
        .field("Welcome Message", format!("`{}`", config.welcome_message), false)
        .field("Goodbye Message", format!("`{}`", config.goodbye_message), false)
        .field("Welcome Image", &config.welcome_image_url, false)
        .field("Goodbye Image", &config.goodbye_image_url, false)
        .color(colors::INFO)
}

/// Show the current greeting configuration
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = match ctx.guild_id() {
        Some(id) => id.get(),
        None => {
            ctx.say("This command can only be used in a server.").await?;
            return Ok(());
        }
    };

    let config = match ctx.data().store.get_or_create(guild_id).await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to fetch guild config: {:?}", e);
            ctx.say("Failed to fetch configuration.").await?;
            return Ok(());
        }
    };

    ctx.send(
        poise::CreateReply::default()
            .embed(config_embed(&config))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
