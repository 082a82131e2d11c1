//! Startup configuration loading
//!
//! Defaults, then an optional JSON file named by `ROAD_CONFIG`, then
//! individual environment overrides.

use anyhow::{Context, Result};
use road_core::AppConfig;

pub const CONFIG_FILE_VAR: &str = "ROAD_CONFIG";
pub const API_PORT_VAR: &str = "ROAD_API_PORT";
pub const PRICE_URL_VAR: &str = "ROAD_PRICE_URL";
pub const REFRESH_SECS_VAR: &str = "ROAD_REFRESH_SECS";
pub const MANUAL_PRICE_VAR: &str = "ROAD_MANUAL_PRICE";

/// Load config from the process environment
pub fn load_config() -> Result<AppConfig> {
    config_from_env(|key| std::env::var(key).ok())
}

/// Load config using `lookup` to read environment variables
pub fn config_from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let mut config = match lookup(CONFIG_FILE_VAR) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            AppConfig::from_json(&json).with_context(|| format!("invalid config file {}", path))?
        }
        None => AppConfig::default(),
    };

    if let Some(port) = lookup(API_PORT_VAR) {
        config.api_port = port
            .trim()
            .parse()
            .with_context(|| format!("{} must be a port number, got {:?}", API_PORT_VAR, port))?;
    }
    if let Some(url) = lookup(PRICE_URL_VAR) {
        config.price.url = url;
    }
    if let Some(secs) = lookup(REFRESH_SECS_VAR) {
        config.refresh_interval_secs = secs.trim().parse().with_context(|| {
            format!("{} must be a number of seconds, got {:?}", REFRESH_SECS_VAR, secs)
        })?;
    }
    if let Some(price) = lookup(MANUAL_PRICE_VAR) {
        let price = price.trim();
        config.manual_price = if price.is_empty() {
            None
        } else {
            Some(price.parse().with_context(|| {
                format!("{} must be a number, got {:?}", MANUAL_PRICE_VAR, price)
            })?)
        };
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from_env(env(&[])).unwrap();
        assert_eq!(config.api_port, 19021);
        assert_eq!(config.refresh_interval_secs, 60);
        assert!(config.manual_price.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from_env(env(&[
            (API_PORT_VAR, "8080"),
            (PRICE_URL_VAR, "http://127.0.0.1:9999/spot"),
            (REFRESH_SECS_VAR, " 15 "),
            (MANUAL_PRICE_VAR, "61000"),
        ]))
        .unwrap();

        assert_eq!(config.api_port, 8080);
        assert_eq!(config.price.url, "http://127.0.0.1:9999/spot");
        assert_eq!(config.refresh_interval_secs, 15);
        assert_eq!(config.manual_price, Some(61_000.0));
    }

    #[test]
    fn test_invalid_env_values() {
        assert!(config_from_env(env(&[(API_PORT_VAR, "http")])).is_err());
        assert!(config_from_env(env(&[(REFRESH_SECS_VAR, "-1")])).is_err());
        assert!(config_from_env(env(&[(MANUAL_PRICE_VAR, "cheap")])).is_err());
        assert!(config_from_env(env(&[(MANUAL_PRICE_VAR, "0")])).is_err());
        assert!(config_from_env(env(&[(PRICE_URL_VAR, "")])).is_err());
    }

    #[test]
    fn test_empty_manual_price_clears_it() {
        let config = config_from_env(env(&[(MANUAL_PRICE_VAR, "")])).unwrap();
        assert!(config.manual_price.is_none());
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("road-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"api_port": 3000, "refresh_interval_secs": 0}"#).unwrap();

        let path_str = path.to_string_lossy().to_string();
        let config = config_from_env(env(&[
            (CONFIG_FILE_VAR, path_str.as_str()),
            (API_PORT_VAR, "3001"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        // Env wins over the file
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.refresh_interval_secs, 0);
    }

    #[test]
    fn test_missing_config_file() {
        let err = config_from_env(env(&[(CONFIG_FILE_VAR, "/nonexistent/road.json")])).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/road.json"));
    }
}
