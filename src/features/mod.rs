// Bot features
pub mod event_handler;
pub mod greeter;
pub mod guild_store;
pub mod notice;
