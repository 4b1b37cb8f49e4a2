// Greeter
// Membership events -> rendered notices, admin commands -> config updates

use std::future::Future;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::features::guild_store::{GuildStore, StoreError};
use crate::features::notice;
use crate::models::guild::{FieldUpdate, GuildConfig, DEFAULT_SETTINGS};
use crate::models::notice::{Notice, NoticeKind};
use crate::utils::color::{normalize_hex_color, parse_hex_color, ColorError};

/// Reply sent when the backing file can't be written
pub const SAVE_FAILED: &str = "Failed to save configuration. Please try again.";

/// The platform side of notice delivery
pub trait NoticeGateway {
    type Channel: Send + Sync;

    /// Look up a channel by ID, `None` if it's gone or inaccessible
    fn resolve_channel(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Option<Self::Channel>> + Send;

    fn send_notice(
        &self,
        channel: &Self::Channel,
        notice: &Notice,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Error, Debug)]
pub enum GreetError {
    #[error("No channel configured")]
    ChannelUnset,

    #[error("Channel {0} not found")]
    ChannelNotFound(u64),

    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error("Failed to send notice: {0}")]
    Send(anyhow::Error),
}

/// Whoever a notice is about
#[derive(Debug, Clone)]
pub struct Actor {
    pub mention: String,
    pub name: String,
    pub avatar_url: String,
}

/// Member joined or left a guild
#[derive(Debug, Clone)]
pub struct MemberEvent {
    pub guild_id: u64,
    pub member_id: u64,
    pub actor: Actor,
}

/// Administrator edit, permission already checked by the caller
#[derive(Debug, Clone)]
pub enum AdminCommand {
    SetChannel { kind: NoticeKind, channel_id: u64 },
    SetMessage { kind: NoticeKind, message: String },
    SetImage { kind: NoticeKind, image_url: String },
    SetColor { kind: NoticeKind, hex_code: String },
    /// Send the notice now with the caller standing in for a member
    Preview { kind: NoticeKind, caller: Actor },
}

/// Text to send back to the command's caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}

impl Reply {
    fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

fn channel_for(config: &GuildConfig, kind: NoticeKind) -> Option<u64> {
    match kind {
        NoticeKind::Welcome => config.welcome_channel_id,
        NoticeKind::Goodbye => config.goodbye_channel_id,
    }
}

/// Bot was added to a guild: make sure it has settings
pub async fn on_guild_joined(store: &GuildStore, guild_id: u64) {
    match store.get_or_create(guild_id).await {
        Ok(_) => debug!("Config ready for guild {}", guild_id),
        Err(e) => error!("Failed to initialize config for guild {}: {}", guild_id, e),
    }
}

pub async fn on_member_joined<G: NoticeGateway>(store: &GuildStore, gateway: &G, event: &MemberEvent) {
    on_member_event(store, gateway, NoticeKind::Welcome, event).await
}

pub async fn on_member_left<G: NoticeGateway>(store: &GuildStore, gateway: &G, event: &MemberEvent) {
    on_member_event(store, gateway, NoticeKind::Goodbye, event).await
}

/// Best effort: every failure is logged and swallowed
async fn on_member_event<G: NoticeGateway>(
    store: &GuildStore,
    gateway: &G,
    kind: NoticeKind,
    event: &MemberEvent,
) {
    match deliver(store, gateway, kind, event.guild_id, &event.actor).await {
        Ok(()) => info!(
            "Sent {:?} notice for member {} in guild {}",
            kind, event.member_id, event.guild_id
        ),
        Err(GreetError::ChannelUnset) => debug!(
            "No {:?} channel in guild {}, skipping",
            kind, event.guild_id
        ),
        Err(e) => warn!(
            "Skipped {:?} notice for member {} in guild {}: {}",
            kind, event.member_id, event.guild_id, e
        ),
    }
}

/// Resolve the configured channel, render and send. Shared by live events and previews.
pub async fn deliver<G: NoticeGateway>(
    store: &GuildStore,
    gateway: &G,
    kind: NoticeKind,
    guild_id: u64,
    actor: &Actor,
) -> Result<(), GreetError> {
    let config = store.get_or_create(guild_id).await?;
    let channel_id = channel_for(&config, kind).ok_or(GreetError::ChannelUnset)?;
    let channel = gateway
        .resolve_channel(channel_id)
        .await
        .ok_or(GreetError::ChannelNotFound(channel_id))?;

    let notice = notice::render(kind, &config, &actor.mention, &actor.name, &actor.avatar_url)?;
    gateway
        .send_notice(&channel, &notice)
        .await
        .map_err(GreetError::Send)
}

/// Run an admin command. Always yields exactly one reply.
pub async fn handle_command<G: NoticeGateway>(
    store: &GuildStore,
    gateway: &G,
    guild_id: u64,
    command: AdminCommand,
) -> Reply {
    match command {
        AdminCommand::SetChannel { kind, channel_id } => {
            let update = match kind {
                NoticeKind::Welcome => FieldUpdate::WelcomeChannel(channel_id),
                NoticeKind::Goodbye => FieldUpdate::GoodbyeChannel(channel_id),
            };
            let text = format!("{} messages will now be sent in <#{}>.", kind.label(), channel_id);
            apply(store, guild_id, update, text).await
        }
        AdminCommand::SetMessage { kind, message } => {
            let text = format!("{} message set to: `{}`", kind.label(), message);
            let update = match kind {
                NoticeKind::Welcome => FieldUpdate::WelcomeMessage(message),
                NoticeKind::Goodbye => FieldUpdate::GoodbyeMessage(message),
            };
            apply(store, guild_id, update, text).await
        }
        AdminCommand::SetImage { kind, image_url } => {
            let text = format!("{} image URL set to: `{}`", kind.label(), image_url);
            let update = match kind {
                NoticeKind::Welcome => FieldUpdate::WelcomeImage(image_url),
                NoticeKind::Goodbye => FieldUpdate::GoodbyeImage(image_url),
            };
            apply(store, guild_id, update, text).await
        }
        AdminCommand::SetColor { kind, hex_code } => {
            if let Err(e) = parse_hex_color(&hex_code) {
                debug!("Rejected color for guild {}: {}", guild_id, e);
                let example = match kind {
                    NoticeKind::Welcome => &DEFAULT_SETTINGS.welcome_color,
                    NoticeKind::Goodbye => &DEFAULT_SETTINGS.goodbye_color,
                };
                return Reply::ephemeral(format!(
                    "Invalid hex code! Please provide a valid hex color code (e.g., `#{}`).",
                    example
                ));
            }

            let digits = normalize_hex_color(&hex_code);
            let text = format!("{} embed color set to: `#{}`", kind.label(), digits);
            let update = match kind {
                NoticeKind::Welcome => FieldUpdate::WelcomeColor(digits),
                NoticeKind::Goodbye => FieldUpdate::GoodbyeColor(digits),
            };
            apply(store, guild_id, update, text).await
        }
        AdminCommand::Preview { kind, caller } => {
            preview(store, gateway, guild_id, kind, &caller).await
        }
    }
}

async fn apply(store: &GuildStore, guild_id: u64, update: FieldUpdate, text: String) -> Reply {
    match store.update(guild_id, update).await {
        Ok(_) => Reply::public(text),
        Err(_) => Reply::ephemeral(SAVE_FAILED),
    }
}

async fn preview<G: NoticeGateway>(
    store: &GuildStore,
    gateway: &G,
    guild_id: u64,
    kind: NoticeKind,
    caller: &Actor,
) -> Reply {
    let label = kind.label();
    let lower = label.to_lowercase();

    match deliver(store, gateway, kind, guild_id, caller).await {
        Ok(()) => Reply::ephemeral(format!("{} message preview sent!", label)),
        Err(GreetError::ChannelUnset) => Reply::ephemeral(format!("{} channel not set!", label)),
        Err(GreetError::ChannelNotFound(_)) => {
            Reply::ephemeral(format!("{} channel not found!", label))
        }
        Err(GreetError::InvalidColor(_)) => Reply::ephemeral(format!(
            "The stored {} color is invalid. Set a new one with `/set_{}_color`.",
            lower, lower
        )),
        Err(GreetError::Persistence(_)) => Reply::ephemeral(SAVE_FAILED),
        Err(GreetError::Send(e)) => {
            warn!("Preview send failed in guild {}: {:?}", guild_id, e);
            Reply::ephemeral(format!(
                "Couldn't send the {} preview. Check my permissions in that channel.",
                lower
            ))
        }
    }
}
