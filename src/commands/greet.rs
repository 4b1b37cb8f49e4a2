// Greeting commands - edit and preview the welcome/goodbye notices

use poise::serenity_prelude as serenity;

use crate::api::discord::{actor_from_user, DiscordGateway};
use crate::features::greeter::{self, AdminCommand};
use crate::models::notice::NoticeKind;
use crate::{Context, Error};

/// Run an admin command for the current guild and send its reply
async fn run(ctx: Context<'_>, command: AdminCommand) -> Result<(), Error> {
    let guild_id = match ctx.guild_id() {
        Some(id) => id.get(),
        None => {
            ctx.say("This command can only be used in a server.").await?;
            return Ok(());
        }
    };

    let gateway = DiscordGateway::new(ctx.serenity_context());
    let reply = greeter::handle_command(&ctx.data().store, &gateway, guild_id, command).await;

    ctx.send(
        poise::CreateReply::default()
            .content(reply.content)
            .ephemeral(reply.ephemeral),
    )
    .await?;

    Ok(())
}

/// Set the channel for welcome messages.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_welcome_channel(
    ctx: Context<'_>,
    #[description = "Channel for welcome messages"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let command = AdminCommand::SetChannel {
        kind: NoticeKind::Welcome,
        channel_id: channel.id.get(),
    };
    run(ctx, command).await
}

/// Set the channel for goodbye messages.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_goodbye_channel(
    ctx: Context<'_>,
    #[description = "Channel for goodbye messages"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let command = AdminCommand::SetChannel {
        kind: NoticeKind::Goodbye,
        channel_id: channel.id.get(),
    };
    run(ctx, command).await
}

/// Set the custom welcome message.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_welcome_message(
    ctx: Context<'_>,
    #[description = "Message text, {mention} is replaced by the new member"] message: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetMessage {
        kind: NoticeKind::Welcome,
        message,
    };
    run(ctx, command).await
}

/// Set the custom goodbye message.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_goodbye_message(
    ctx: Context<'_>,
    #[description = "Message text, {name} is replaced by the member's name"] message: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetMessage {
        kind: NoticeKind::Goodbye,
        message,
    };
    run(ctx, command).await
}

/// Set the custom welcome image URL.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_welcome_image(
    ctx: Context<'_>,
    #[description = "Image URL"] image_url: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetImage {
        kind: NoticeKind::Welcome,
        image_url,
    };
    run(ctx, command).await
}

/// Set the custom goodbye image URL.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_goodbye_image(
    ctx: Context<'_>,
    #[description = "Image URL"] image_url: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetImage {
        kind: NoticeKind::Goodbye,
        image_url,
    };
    run(ctx, command).await
}

/// Set the custom welcome embed color (hex code).
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_welcome_color(
    ctx: Context<'_>,
    #[description = "Hex color, e.g. #00FF00"] hex_code: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetColor {
        kind: NoticeKind::Welcome,
        hex_code,
    };
    run(ctx, command).await
}

/// Set the custom goodbye embed color (hex code).
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn set_goodbye_color(
    ctx: Context<'_>,
    #[description = "Hex color, e.g. #FF0000"] hex_code: String,
) -> Result<(), Error> {
    let command = AdminCommand::SetColor {
        kind: NoticeKind::Goodbye,
        hex_code,
    };
    run(ctx, command).await
}

/// Preview the welcome message.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn test_greet(ctx: Context<'_>) -> Result<(), Error> {
    let command = AdminCommand::Preview {
        kind: NoticeKind::Welcome,
        caller: actor_from_user(ctx.author()),
    };
    run(ctx, command).await
}

/// Preview the goodbye message.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn test_goodbye(ctx: Context<'_>) -> Result<(), Error> {
    let command = AdminCommand::Preview {
        kind: NoticeKind::Goodbye,
        caller: actor_from_user(ctx.author()),
    };
    run(ctx, command).await
}
