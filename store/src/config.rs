/// Store configuration module
/// Reads database settings from the environment (and a `.env` file when present)

use std::env;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const MAX_CONNECTIONS_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded variables from .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load database configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_URL".to_string()))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid max_connections: {} ({})", raw, e))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        if max_connections < 1 || max_connections > MAX_CONNECTIONS_LIMIT {
            return Err(ConfigError::InvalidConfig(format!(
                "max_connections must be between 1 and {}",
                MAX_CONNECTIONS_LIMIT
            )));
        }

        info!(
            "Database configuration loaded: max_connections={}",
            max_connections
        );

        Ok(DatabaseConfig {
            connection_string,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            DatabaseConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/library")]))
                .expect("Should load with defaults");
        assert_eq!(config.connection_string, "postgres://localhost/library");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(
            DatabaseConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingEnv("DATABASE_URL".to_string()))
        );
        assert!(DatabaseConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn test_max_connections_parsed_and_bounded() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/library"),
            ("DB_MAX_CONNECTIONS", "25"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 25);

        for bad in ["0", "101", "many", "-1"] {
            let result = DatabaseConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://db/library"),
                ("DB_MAX_CONNECTIONS", bad),
            ]));
            assert!(matches!(result, Err(ConfigError::InvalidConfig(_))), "{}", bad);
        }
    }
}
