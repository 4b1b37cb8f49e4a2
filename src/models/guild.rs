use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Template every new guild starts from
pub static DEFAULT_SETTINGS: Lazy<GuildConfig> = Lazy::new(|| GuildConfig {
    welcome_channel_id: None,
    goodbye_channel_id: None,
    welcome_message: "Welcome, {mention}! 🎉".to_string(),
    goodbye_message: "Goodbye, {name}. We'll miss you! 👋".to_string(),
    welcome_image_url: "https://example.com/welcome_image.png".to_string(),
    goodbye_image_url: "https://example.com/goodbye_image.png".to_string(),
    welcome_color: "00FF00".to_string(),
    goodbye_color: "FF0000".to_string(),
});

/// Guild (Server) specific greeting configuration
///
/// Keys missing from a stored record are filled from [`DEFAULT_SETTINGS`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GuildConfig {
    /// Channel ID for welcome notices
    pub welcome_channel_id: Option<u64>,
    /// Channel ID for goodbye notices
    pub goodbye_channel_id: Option<u64>,
    /// Welcome text, `{mention}` is replaced by the new member's mention
    pub welcome_message: String,
    /// Goodbye text, `{name}` is replaced by the departing member's name
    pub goodbye_message: String,
    pub welcome_image_url: String,
    pub goodbye_image_url: String,
    /// Hex digits without the leading `#`
    pub welcome_color: String,
    pub goodbye_color: String,
}

impl Default for GuildConfig {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

/// A whole-field replacement on a [`GuildConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    WelcomeChannel(u64),
    GoodbyeChannel(u64),
    WelcomeMessage(String),
    GoodbyeMessage(String),
    WelcomeImage(String),
    GoodbyeImage(String),
    /// Already validated, stored form (no `#`)
    WelcomeColor(String),
    GoodbyeColor(String),
}

impl FieldUpdate {
    /// Stored key this update writes
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::WelcomeChannel(_) => "welcome_channel_id",
            FieldUpdate::GoodbyeChannel(_) => "goodbye_channel_id",
            FieldUpdate::WelcomeMessage(_) => "welcome_message",
            FieldUpdate::GoodbyeMessage(_) => "goodbye_message",
            FieldUpdate::WelcomeImage(_) => "welcome_image_url",
            FieldUpdate::GoodbyeImage(_) => "goodbye_image_url",
            FieldUpdate::WelcomeColor(_) => "welcome_color",
            FieldUpdate::GoodbyeColor(_) => "goodbye_color",
        }
    }

    pub fn apply(self, config: &mut GuildConfig) {
        match self {
            FieldUpdate::WelcomeChannel(id) => config.welcome_channel_id = Some(id),
            FieldUpdate::GoodbyeChannel(id) => config.goodbye_channel_id = Some(id),
            FieldUpdate::WelcomeMessage(v) => config.welcome_message = v,
            FieldUpdate::GoodbyeMessage(v) => config.goodbye_message = v,
            FieldUpdate::WelcomeImage(v) => config.welcome_image_url = v,
            FieldUpdate::GoodbyeImage(v) => config.goodbye_image_url = v,
            FieldUpdate::WelcomeColor(v) => config.welcome_color = v,
            FieldUpdate::GoodbyeColor(v) => config.goodbye_color = v,
        }
    }
}
