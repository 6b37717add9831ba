/// Database connection and table creation
pub mod database;

/// Initial catalog and allow-list seeding
pub mod seed;

/// Application settings from the environment and config.toml
pub mod settings;

pub use settings::AppConfig;
