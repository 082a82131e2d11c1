//! Configuration types for Road to 1 BTC

use serde::{Deserialize, Serialize};

use crate::constants::{COINBASE_SPOT_URL, DEFAULT_USER_AGENT};
use crate::{Error, Result, UsdPrice};

/// Upstream quote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSourceConfig {
    /// Spot price URL (e.g., "https://api.coinbase.com/v2/prices/BTC-USD/spot")
    pub url: String,

    /// User-Agent header sent upstream
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            url: COINBASE_SPOT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Live price source settings
    pub price: PriceSourceConfig,

    /// Manually entered BTC/USD price. When set, the live source is not queried.
    pub manual_price: Option<f64>,

    /// Seconds between background price refreshes (0 disables the refresher)
    pub refresh_interval_secs: u64,

    /// API server port
    pub api_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price: PriceSourceConfig::default(),
            manual_price: None,
            refresh_interval_secs: 60,
            api_port: 19021,
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.price.url.trim().is_empty() {
            return Err(Error::Config("price.url must not be empty".to_string()));
        }
        if self.price.timeout_secs == 0 {
            return Err(Error::Config("price.timeout_secs must be positive".to_string()));
        }
        if let Some(manual) = self.manual_price {
            if UsdPrice::new(manual).is_none() {
                return Err(Error::Config(format!(
                    "manual_price must be finite and positive, got {}",
                    manual
                )));
            }
        }
        Ok(())
    }

    /// The manual price, if one is configured and valid
    pub fn manual_usd_price(&self) -> Option<UsdPrice> {
        self.manual_price.and_then(UsdPrice::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.price.url, COINBASE_SPOT_URL);
        assert_eq!(config.price.user_agent, "zero-to-1btc");
        assert_eq!(config.price.timeout_secs, 10);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.api_port, 19021);
        assert!(config.manual_price.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.price.url, config.price.url);
        assert_eq!(parsed.api_port, config.api_port);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{"api_port": 8080, "price": {"timeout_secs": 3}}"#)
            .unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.price.timeout_secs, 3);
        assert_eq!(config.price.url, COINBASE_SPOT_URL);
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.manual_price = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.price.url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.price.timeout_secs = 0;
        assert!(config.validate().is_err());

        assert!(AppConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_manual_usd_price() {
        let mut config = AppConfig::default();
        assert!(config.manual_usd_price().is_none());
        config.manual_price = Some(65_000.0);
        assert_eq!(config.manual_usd_price().map(|p| p.value()), Some(65_000.0));
    }
}
