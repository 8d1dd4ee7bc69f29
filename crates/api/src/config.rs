//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use common::LanguageCode;
use domain::GravatarResolver;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: host platform database; unset serves in-memory demo data
/// - `DEFAULT_LANGUAGE`: language when a request names none (default: `"en"`)
/// - `CACHE_TTL_SECS`: lifetime of a rendered table (default: `300`)
/// - `CACHE_MAX_ENTRIES`: render cache capacity (default: `10000`)
/// - `AVATAR_SIZE`: avatar edge length in pixels (default: `24`)
/// - `AVATAR_DEFAULT`: gravatar fallback image (default: `"wavatar"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub default_language: LanguageCode,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
    pub avatar_size: u16,
    pub avatar_default: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            default_language: lookup("DEFAULT_LANGUAGE")
                .map(LanguageCode::new)
                .unwrap_or(defaults.default_language),
            cache_ttl: parse_var(&lookup, "CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            cache_max_entries: parse_var(&lookup, "CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            avatar_size: parse_var(&lookup, "AVATAR_SIZE").unwrap_or(defaults.avatar_size),
            avatar_default: lookup("AVATAR_DEFAULT").unwrap_or(defaults.avatar_default),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring unparseable configuration value");
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            default_language: LanguageCode::default(),
            cache_ttl: Duration::from_secs(300),
            cache_max_entries: 10_000,
            avatar_size: GravatarResolver::DEFAULT_SIZE,
            avatar_default: GravatarResolver::DEFAULT_IMAGE.to_string(),
        }
    }
}
