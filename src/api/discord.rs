// Discord adapter
// Channel lookup and notice delivery through serenity

use std::future::Future;

use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;
use tracing::debug;

use crate::features::greeter::{Actor, NoticeGateway};
use crate::models::notice::Notice;

/// Sends notices through the gateway connection of the current event/command
#[derive(Clone, Copy)]
pub struct DiscordGateway<'a> {
    ctx: &'a serenity::Context,
}

impl<'a> DiscordGateway<'a> {
    pub fn new(ctx: &'a serenity::Context) -> Self {
        Self { ctx }
    }
}

impl NoticeGateway for DiscordGateway<'_> {
    type Channel = serenity::GuildChannel;

    fn resolve_channel(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Option<serenity::GuildChannel>> + Send {
        let ctx = self.ctx;
        async move {
            // Snowflakes are never zero, ChannelId::new would panic
            if channel_id == 0 {
                return None;
            }

            match serenity::ChannelId::new(channel_id).to_channel(ctx).await {
                Ok(channel) => channel.guild(),
                Err(e) => {
                    debug!("Channel {} did not resolve: {:?}", channel_id, e);
                    None
                }
            }
        }
    }

    fn send_notice(
        &self,
        channel: &serenity::GuildChannel,
        notice: &Notice,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let ctx = self.ctx;
        let channel_id = channel.id;
        let message = serenity::CreateMessage::new().embed(notice_embed(notice));
        async move {
            channel_id.send_message(ctx, message).await?;
            Ok(())
        }
    }
}

/// Embed for a rendered notice
pub fn notice_embed(notice: &Notice) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(&notice.title)
        .description(&notice.description)
        .color(notice.color)
        .thumbnail(&notice.thumbnail_url)
        .image(&notice.image_url)
}

/// The user a notice is about (or the admin running a preview)
pub fn actor_from_user(user: &serenity::User) -> Actor {
    Actor {
        mention: user.mention().to_string(),
        name: user.name.clone(),
        avatar_url: user.avatar_url().unwrap_or_else(|| user.default_avatar_url()),
    }
}
