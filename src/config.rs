//! Environment-driven application configuration.
//!
//! The master key itself is never stored here; [`AppConfig`] only records
//! whether it is usable, so the value can be serialized and printed.

use serde::Serialize;

use crate::security::encryption::{EncryptionError, MasterKey, MASTER_KEY_ENV};

const DEFAULT_DATABASE_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE_NAME: &str = "todoapp";
const DEFAULT_PORT: u16 = 3000;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unknown values fall back to development.
    pub fn parse(value: &str) -> Self {
        match value {
            "production" => Self::Production,
            "staging" => Self::Staging,
            _ => Self::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Document store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub database_name: String,
    pub port: Option<u16>,
}

/// Usability of `ENCRYPTION_MASTER_KEY`, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum MasterKeyStatus {
    Missing,
    TooShort { length: usize },
    Valid { length: usize },
}

impl MasterKeyStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub environment: Environment,
    pub port: u16,
    pub master_key: MasterKeyStatus,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("NODE_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let database = DatabaseConfig {
            connection_string: lookup("MONGODB_URI")
                .unwrap_or_else(|| DEFAULT_DATABASE_URI.to_string()),
            database_name: lookup("MONGODB_DB")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            port: lookup("MONGODB_PORT").and_then(|v| v.parse().ok()),
        };

        let port = match lookup("PORT").map(|v| v.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!(error = %e, default = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };

        let master_key = master_key_status(lookup(MASTER_KEY_ENV));

        Self {
            database,
            environment,
            port,
            master_key,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn master_key_status(value: Option<String>) -> MasterKeyStatus {
    match value.map(MasterKey::new) {
        None => MasterKeyStatus::Missing,
        Some(Ok(key)) => MasterKeyStatus::Valid { length: key.len() },
        Some(Err(EncryptionError::MasterKeyTooShort { length })) => {
            MasterKeyStatus::TooShort { length }
        }
        Some(Err(_)) => MasterKeyStatus::Missing,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
