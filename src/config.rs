use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// In-memory storage is used when this is not set.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub cors_origin: HeaderValue,
    pub static_dir: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            bind_addr: "127.0.0.1:3000".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            static_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => defaults.max_connections,
        };

        let cors_origin = match get("CORS_ORIGIN") {
            Some(value) => match value.parse::<HeaderValue>() {
                Ok(origin) => origin,
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        key: "CORS_ORIGIN",
                        value,
                    })
                }
            },
            None => defaults.cors_origin,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            max_connections,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origin,
            static_dir: get("STATIC_DIR"),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.static_dir, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/finanal_db"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("BIND_ADDR", "0.0.0.0:5000"),
            ("CORS_ORIGIN", "https://finance.example.com"),
            ("STATIC_DIR", "../frontend"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/finanal_db"));
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.cors_origin, "https://finance.example.com");
        assert_eq!(config.static_dir.as_deref(), Some("../frontend"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  "), ("BIND_ADDR", "")])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn rejects_bad_pool_size() {
        for bad in ["zero", "0", "-3"] {
            let err = AppConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
        }
    }

    #[test]
    fn rejects_bad_origin() {
        let err = AppConfig::from_lookup(lookup(&[("CORS_ORIGIN", "http://bad\norigin")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CORS_ORIGIN", .. }));
    }
}
