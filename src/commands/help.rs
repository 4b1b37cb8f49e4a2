// Help command - show usage guide

use poise::serenity_prelude as serenity;
use crate::{Context, Error};
use crate::utils::config::colors;

/// Show help and usage guide
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("👋 Greeter Bot - Help")
        .description("Welcomes new members and says goodbye to departing ones")
        .color(colors::PRIMARY)
        .field(
            "📢 Channels",
            "`/set_welcome_channel` - Where welcome messages go\n\
            `/set_goodbye_channel` - Where goodbye messages go",
            false,
        )
        .field(
            "✏️ Messages",
            "`/set_welcome_message` - Use `{mention}` for the new member\n\
            `/set_goodbye_message` - Use `{name}` for the departing member",
            false,
        )
        .field(
            "🎨 Style",
            "`/set_welcome_image` / `/set_goodbye_image` - Embed image URL\n\
            `/set_welcome_color` / `/set_goodbye_color` - Embed color, e.g. `#00FF00`",
            false,
        )
        .field(
            "🔍 Preview",
            "`/test_greet` - Send a sample welcome message\n\
            `/test_goodbye` - Send a sample goodbye message\n\
            `/config` - View current configuration",
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(
            "Administrator permission required • Built with Serenity & Poise",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
