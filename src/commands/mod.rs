// Slash commands
pub mod config;
pub mod greet;
pub mod help;
