// Platform adapters
pub mod discord;
