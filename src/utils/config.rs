// Centralized configuration for the Greeter bot

use std::env;
use std::path::PathBuf;

use anyhow::{Context as _, Result};

/// Backing file used when GUILD_CONFIG_PATH is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "greeter_rs=info";

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: String,
    pub config_path: PathBuf,
}

impl BotSettings {
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
        let config_path = env::var("GUILD_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Ok(Self { token, config_path })
    }
}

/// Discord embed colors for bot replies
pub mod colors {
    pub const PRIMARY: u32 = 0x00bfff;
    pub const INFO: u32 = 0x3498db;
}
