// Gateway event handler - routes guild and member events to the greeter

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::api::discord::{actor_from_user, DiscordGateway};
use crate::features::greeter::{self, MemberEvent};
use crate::{Data, Error};

/// Handle events poise doesn't consume itself
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    let gateway = DiscordGateway::new(ctx);

    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            debug!("Gateway ready as {}", data_about_bot.user.name);
        }
        // Also fires for every existing guild on connect, so guilds added
        // while the bot was offline get their defaults too
        serenity::FullEvent::GuildCreate { guild, .. } => {
            greeter::on_guild_joined(&data.store, guild.id.get()).await;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            let event = MemberEvent {
                guild_id: new_member.guild_id.get(),
                member_id: new_member.user.id.get(),
                actor: actor_from_user(&new_member.user),
            };
            greeter::on_member_joined(&data.store, &gateway, &event).await;
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            let event = MemberEvent {
                guild_id: guild_id.get(),
                member_id: user.id.get(),
                actor: actor_from_user(user),
            };
            greeter::on_member_left(&data.store, &gateway, &event).await;
        }
        _ => {}
    }

    Ok(())
}
