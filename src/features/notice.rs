// Notice Renderer
// Builds welcome/goodbye notices from a guild's settings, no I/O

use crate::models::guild::GuildConfig;
use crate::models::notice::{Notice, NoticeKind};
use crate::utils::color::{parse_hex_color, ColorError};

/// Placeholder substituted in welcome templates
pub const MENTION_PLACEHOLDER: &str = "{mention}";
/// Placeholder substituted in goodbye templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Welcome notice for a member; `mention` replaces `{mention}`
pub fn render_welcome(
    config: &GuildConfig,
    mention: &str,
    avatar_url: &str,
) -> Result<Notice, ColorError> {
    Ok(Notice {
        title: "Welcome!".to_string(),
        description: config.welcome_message.replace(MENTION_PLACEHOLDER, mention),
        color: parse_hex_color(&config.welcome_color)?,
        thumbnail_url: avatar_url.to_string(),
        image_url: config.welcome_image_url.clone(),
    })
}

/// Goodbye notice for a member; `name` replaces `{name}`
pub fn render_goodbye(
    config: &GuildConfig,
    name: &str,
    avatar_url: &str,
) -> Result<Notice, ColorError> {
    Ok(Notice {
        title: "Goodbye!".to_string(),
        description: config.goodbye_message.replace(NAME_PLACEHOLDER, name),
        color: parse_hex_color(&config.goodbye_color)?,
        thumbnail_url: avatar_url.to_string(),
        image_url: config.goodbye_image_url.clone(),
    })
}

/// Render the notice of `kind`. Welcome uses the mention, goodbye the plain name.
pub fn render(
    kind: NoticeKind,
    config: &GuildConfig,
    mention: &str,
    name: &str,
    avatar_url: &str,
) -> Result<Notice, ColorError> {
    match kind {
        NoticeKind::Welcome => render_welcome(config, mention, avatar_url),
        NoticeKind::Goodbye => render_goodbye(config, name, avatar_url),
    }
}
