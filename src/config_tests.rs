//! Tests for environment configuration.

use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.database.connection_string, "mongodb://localhost:27017");
    assert_eq!(config.database.database_name, "todoapp");
    assert_eq!(config.database.port, None);
    assert_eq!(config.port, 3000);
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.master_key, MasterKeyStatus::Missing);
}

#[test]
fn test_database_overrides() {
    let config = config_from(&[
        ("MONGODB_URI", "mongodb://test-server:27017"),
        ("MONGODB_DB", "test-db"),
        ("MONGODB_PORT", "27018"),
        ("PORT", "8080"),
    ]);
    assert_eq!(config.database.connection_string, "mongodb://test-server:27017");
    assert_eq!(config.database.database_name, "test-db");
    assert_eq!(config.database.port, Some(27018));
    assert_eq!(config.port, 8080);
}

#[test]
fn test_environment_detection() {
    let config = config_from(&[("NODE_ENV", "production")]);
    assert!(config.is_production());
    assert!(!config.is_development());

    let config = config_from(&[("NODE_ENV", "staging")]);
    assert_eq!(config.environment, Environment::Staging);
    assert!(!config.is_production());
    assert!(!config.is_development());

    let config = config_from(&[("NODE_ENV", "test")]);
    assert!(config.is_development());
}

#[test]
fn test_invalid_port_falls_back() {
    let config = config_from(&[("PORT", "not-a-port"), ("MONGODB_PORT", "x")]);
    assert_eq!(config.port, 3000);
    assert_eq!(config.database.port, None);
}

#[test]
fn test_master_key_status() {
    let short = config_from(&[("ENCRYPTION_MASTER_KEY", "short")]);
    assert_eq!(short.master_key, MasterKeyStatus::TooShort { length: 5 });
    assert!(!short.master_key.is_valid());

    let key = "ab".repeat(32);
    let valid = config_from(&[("ENCRYPTION_MASTER_KEY", key.as_str())]);
    assert_eq!(valid.master_key, MasterKeyStatus::Valid { length: 64 });
    assert!(valid.master_key.is_valid());

    let empty = config_from(&[("ENCRYPTION_MASTER_KEY", "")]);
    assert_eq!(empty.master_key, MasterKeyStatus::Missing);
}

#[test]
fn test_serialized_config_omits_key() {
    let key = "ab".repeat(32);
    let config = config_from(&[("ENCRYPTION_MASTER_KEY", key.as_str()), ("NODE_ENV", "production")]);
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains(&key));
    assert!(json.contains("\"production\""));
    assert!(json.contains("\"status\":\"valid\""));
}

#[test]
fn test_environment_display() {
    assert_eq!(Environment::Development.to_string(), "development");
    assert_eq!(Environment::Staging.to_string(), "staging");
    assert_eq!(Environment::Production.to_string(), "production");
}
