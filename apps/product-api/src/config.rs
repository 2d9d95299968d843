//! Product API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `.env` file is read first when one exists (see `main.rs`).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Product API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// How long a single-product response stays cached, in seconds
    pub cache_ttl_secs: u64,

    /// How long a product listing stays cached, in seconds
    pub list_cache_ttl_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            port: parse_or(&lookup, "PORT", 3000)?,

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/motor.db")),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,

            cache_ttl_secs: parse_or(&lookup, "CACHE_TTL_SECS", 5)?,

            list_cache_ttl_secs: parse_or(&lookup, "LIST_CACHE_TTL_SECS", 2)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// TTL for `GET /product/{id}`.
    pub fn item_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// TTL for `GET /product`.
    pub fn list_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_ttl_secs)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_source(source(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, PathBuf::from("./data/motor.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.item_cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.list_cache_ttl(), Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_source(source(&[
            ("PORT", "4000"),
            ("DATABASE_PATH", "/tmp/catalog.db"),
            ("LIST_CACHE_TTL_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.list_cache_ttl_secs, 0);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = ApiConfig::from_source(source(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        let err = ApiConfig::from_source(source(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DB_MAX_CONNECTIONS");
    }
}
