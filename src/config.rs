//! Application configuration loaded from environment variables.
//!
//! The API key and store passphrase are secrets; everything else has a
//! sensible local-development default.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

/// How long a successful fortune locks out the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownPolicy {
    /// Unlock at UTC midnight after the last request (production behavior).
    NextCalendarDay,
    /// Unlock a fixed number of seconds after the last request (diagnostics).
    FixedSeconds(i64),
}

impl CooldownPolicy {
    /// Parse from the `ZOLTAR_COOLDOWN` value: `daily` or `<n>s`.
    /// Unrecognized values fall back to daily.
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        if value == "daily" {
            return CooldownPolicy::NextCalendarDay;
        }
        match value.strip_suffix('s').unwrap_or(&value).parse::<i64>() {
            Ok(secs) if secs > 0 => CooldownPolicy::FixedSeconds(secs),
            _ => {
                tracing::warn!(value = %value, "Unrecognized ZOLTAR_COOLDOWN, using daily");
                CooldownPolicy::NextCalendarDay
            }
        }
    }

    /// Fixed-policy duration, if any.
    pub fn fixed_duration(&self) -> Option<Duration> {
        match self {
            CooldownPolicy::NextCalendarDay => None,
            CooldownPolicy::FixedSeconds(secs) => Some(Duration::seconds(*secs)),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the fortune generation API
    pub api_url: String,
    /// Path of the encrypted local store file
    pub store_path: PathBuf,
    /// Cooldown between fortunes
    pub cooldown: CooldownPolicy,

    // --- Secrets ---
    /// API key sent as X-API-KEY
    pub api_key: String,
    /// Passphrase the store encryption key is derived from
    pub store_key: String,

    // --- Feature flags ---
    /// Bypass the cooldown entirely
    pub unlimited_fortunes: bool,
    /// Enable the hidden counter-based override
    pub secret_interaction: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            store_path: PathBuf::from("zoltar-store.bin"),
            cooldown: CooldownPolicy::NextCalendarDay,
            api_key: "test_api_key".to_string(),
            store_key: "test_store_passphrase".to_string(),
            unlimited_fortunes: false,
            secret_interaction: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: env::var("ZOLTAR_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("ZOLTAR_API_URL"))?,
            store_path: env::var("ZOLTAR_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("zoltar-store.bin")),
            cooldown: env::var("ZOLTAR_COOLDOWN")
                .map(|v| CooldownPolicy::parse(&v))
                .unwrap_or(CooldownPolicy::NextCalendarDay),

            api_key: env::var("ZOLTAR_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ZOLTAR_API_KEY"))?,
            store_key: env::var("ZOLTAR_STORE_KEY")
                .map_err(|_| ConfigError::Missing("ZOLTAR_STORE_KEY"))?,

            unlimited_fortunes: flag_from_env("ZOLTAR_FEATURE_UNLIMITED"),
            secret_interaction: flag_from_env("ZOLTAR_FEATURE_SECRET_INTERACTION"),
        })
    }

    /// Default config for tests (alias kept for test readability).
    pub fn test_default() -> Self {
        Self::default()
    }
}

/// Read a boolean feature flag; anything other than a parsable `true` is off.
fn flag_from_env(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<bool>().ok())
        .unwrap_or(false)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_policy_parse() {
        assert_eq!(CooldownPolicy::parse("daily"), CooldownPolicy::NextCalendarDay);
        assert_eq!(CooldownPolicy::parse("DAILY"), CooldownPolicy::NextCalendarDay);
        assert_eq!(CooldownPolicy::parse("30s"), CooldownPolicy::FixedSeconds(30));
        assert_eq!(CooldownPolicy::parse("86400"), CooldownPolicy::FixedSeconds(86400));
        // Garbage and non-positive values fall back to daily
        assert_eq!(CooldownPolicy::parse("soon"), CooldownPolicy::NextCalendarDay);
        assert_eq!(CooldownPolicy::parse("-5s"), CooldownPolicy::NextCalendarDay);
    }

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("ZOLTAR_API_URL", "https://zoltar.example.com/");
        env::set_var("ZOLTAR_API_KEY", " test_key ");
        env::set_var("ZOLTAR_STORE_KEY", "test_passphrase");
        env::set_var("ZOLTAR_COOLDOWN", "30s");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_url, "https://zoltar.example.com");
        assert_eq!(config.api_key, "test_key");
        assert_eq!(config.cooldown, CooldownPolicy::FixedSeconds(30));
        assert!(!config.unlimited_fortunes);
    }
}
