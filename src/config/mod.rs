/// Database configuration and connection management
pub mod database;

/// Marketplace settings loaded from a TOML file
pub mod market;
