// Utility functions module
pub mod color;
pub mod config;
