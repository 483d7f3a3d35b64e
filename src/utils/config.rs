//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present.

use std::env;

pub const DEFAULT_BOOKING_ID_PREFIX: &str = "BKG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix placed in front of every generated booking id
    pub booking_id_prefix: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Register the demo catalog at startup
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            booking_id_prefix: DEFAULT_BOOKING_ID_PREFIX.to_string(),
            log_level: "info".to_string(),
            seed_catalog: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out so tests don't have to mutate the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let booking_id_prefix = lookup("BOOKING_ID_PREFIX")
            .map(|prefix| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(defaults.booking_id_prefix);

        let log_level = lookup("LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let seed_catalog = lookup("SEED_CATALOG")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_catalog);

        AppConfig {
            booking_id_prefix,
            log_level,
            seed_catalog,
        }
    }
}
