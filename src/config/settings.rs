//! Application settings.
//!
//! Secrets and connection values come from the environment (loaded from
//! `.env` by `main` before this module runs); tunables and seed data come
//! from `config.toml`. Every tunable has a default, so a missing
//! `config.toml` yields a working configuration.

use crate::core::delivery::DeliveryPricing;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Default path of the tunables file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Record store connection URL
    pub database_url: String,
    /// Telegram bot token
    pub bot_token: String,
    /// Chat id all order notifications and command replies go to
    pub chat_id: i64,
    /// Public base URL of this service (used when registering the webhook)
    pub public_base_url: Option<String>,
    /// Delivery pricing and geofence parameters
    pub delivery: DeliveryPricing,
    /// Outbound notification rate limit
    pub rate_limit: RateLimitSettings,
    /// Seed data applied on startup
    pub seed: SeedData,
}

/// Sliding-window quota for outbound notifications.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Maximum sends within the window
    pub quota: usize,
    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        // 20 sends per rolling hour
        Self {
            quota: 20,
            window_secs: 3600,
        }
    }
}

/// Catalog rows and allow-list entries seeded on startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Categories created if missing
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    /// Tags created if missing
    #[serde(default)]
    pub tags: Vec<TagSeed>,
    /// Allow-list entries created if missing
    #[serde(default)]
    pub admins: Vec<AdminSeed>,
}

/// A category to seed.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    /// Category name
    pub name: String,
    /// Category description
    #[serde(default)]
    pub description: String,
}

/// A tag to seed.
#[derive(Debug, Clone, Deserialize)]
pub struct TagSeed {
    /// Tag name
    pub name: String,
}

/// An allow-list entry to seed.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    /// Telegram user id of the operator
    pub telegram_id: i64,
    /// Optional label for the entry
    #[serde(default)]
    pub display_name: Option<String>,
    /// Whether the entry starts active
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// Shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    delivery: DeliveryPricing,
    #[serde(default)]
    rate_limit: RateLimitSettings,
    #[serde(default)]
    categories: Vec<CategorySeed>,
    #[serde(default)]
    tags: Vec<TagSeed>,
    #[serde(default)]
    admins: Vec<AdminSeed>,
}

impl FileConfig {
    fn into_seed(self) -> (DeliveryPricing, RateLimitSettings, SeedData) {
        (
            self.delivery,
            self.rate_limit,
            SeedData {
                categories: self.categories,
                tags: self.tags,
                admins: self.admins,
            },
        )
    }
}

/// Loads the application configuration from the environment and the
/// tunables file at `path` (skipped when the file does not exist).
///
/// # Errors
/// Returns an error if a required environment variable is missing or
/// malformed, or if the tunables file exists but fails to parse.
pub fn load_app_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let (delivery, rate_limit, seed) = load_file_config(path.as_ref())?.into_seed();

    let chat_id_raw = require_var("TELEGRAM_CHAT_ID")?;
    let chat_id = chat_id_raw.parse::<i64>().map_err(|e| Error::Config {
        message: format!("TELEGRAM_CHAT_ID must be a numeric chat id: {e}"),
    })?;

    Ok(AppConfig {
        bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
        database_url: var_or("DATABASE_URL", "sqlite://data/cakebell.sqlite?mode=rwc"),
        bot_token: require_var("TELEGRAM_BOT_TOKEN")?,
        chat_id,
        public_base_url: env::var("PUBLIC_BASE_URL").ok(),
        delivery,
        rate_limit,
        seed,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_var(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::Config {
        message: format!("{key} is not set"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_file_config() {
        let toml_str = r#"
            [delivery]
            per_km_rate = 2.5
            minimum_fee = 6.0
            zone_radius_m = 15000.0

            [rate_limit]
            quota = 10
            window_secs = 60

            [[categories]]
            name = "Wedding"
            description = "Elegant cakes"

            [[tags]]
            name = "chocolate"

            [[admins]]
            telegram_id = 537190136
            display_name = "owner"
        "#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delivery.per_km_rate, 2.5);
        assert_eq!(config.delivery.minimum_fee, 6.0);
        assert_eq!(config.delivery.zone_radius_m, 15000.0);
        // Unset delivery fields keep their defaults
        assert_eq!(config.delivery.free_weight_kg, 5.0);
        assert_eq!(config.rate_limit.quota, 10);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].name, "Wedding");
        assert_eq!(config.tags.len(), 1);
        assert_eq!(config.admins.len(), 1);
        assert!(config.admins[0].is_active);
    }

    #[test]
    fn test_empty_file_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.delivery, DeliveryPricing::default());
        assert_eq!(config.rate_limit, RateLimitSettings::default());
        assert!(config.categories.is_empty());
        assert!(config.admins.is_empty());
    }
}
