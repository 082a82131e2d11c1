//! Application state shared across API handlers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use price_client::{source_from_config, FixedPrice, PriceSource};
use road_core::{AppConfig, PriceError, UsdPrice};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur while setting up the API state
#[derive(Debug, Error)]
pub enum StateError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] road_core::Error),

    /// The configured price source could not be created
    #[error("Price source error: {0}")]
    PriceSource(#[from] PriceError),
}

/// The last successfully fetched price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub price: UsdPrice,
    /// Name of the source that produced it
    pub source: String,
    /// Seconds since the Unix epoch
    pub fetched_at_unix: u64,
}

impl PriceSnapshot {
    pub fn new(price: UsdPrice, source: impl Into<String>) -> Self {
        Self {
            price,
            source: source.into(),
            fetched_at_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    /// Source built from config, restored when a manual price is cleared
    configured_source: Arc<dyn PriceSource>,
    active_source: RwLock<Arc<dyn PriceSource>>,
    last_price: RwLock<Option<PriceSnapshot>>,
}

impl AppState {
    /// Create state from a config, building the price source it describes
    pub fn with_config(config: AppConfig) -> Result<Self, StateError> {
        config.validate()?;
        let source = source_from_config(&config)?;
        Ok(Self::with_source(config, source))
    }

    /// Create with an explicit price source
    pub fn with_source(config: AppConfig, source: Arc<dyn PriceSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                configured_source: source.clone(),
                active_source: RwLock::new(source),
                last_price: RwLock::new(None),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Get the price source currently in use
    pub async fn price_source(&self) -> Arc<dyn PriceSource> {
        self.inner.active_source.read().await.clone()
    }

    /// Fetch a fresh price from the active source.
    ///
    /// On success the snapshot is replaced (last write wins), unless the
    /// active source changed while the request was in flight. On failure
    /// the previous snapshot is left untouched.
    pub async fn fetch_price(&self) -> Result<PriceSnapshot, PriceError> {
        let source = self.price_source().await;

        match source.spot_price().await {
            Ok(price) => {
                let snapshot = PriceSnapshot::new(price, source.name());
                tracing::debug!("BTC price from {}: {}", snapshot.source, price);

                // Hold the source lock so a concurrent switch cannot interleave
                let active = self.inner.active_source.read().await;
                if Arc::ptr_eq(&*active, &source) {
                    let mut last = self.inner.last_price.write().await;
                    *last = Some(snapshot.clone());
                } else {
                    tracing::debug!(
                        "Discarding quote from {}, source switched to {}",
                        source.name(),
                        active.name()
                    );
                }
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch BTC price from {}: {}", source.name(), e);
                Err(e)
            }
        }
    }

    /// Get the last known price, if any fetch has succeeded
    pub async fn last_price(&self) -> Option<PriceSnapshot> {
        self.inner.last_price.read().await.clone()
    }

    /// Switch to a manually entered price, or back to the configured source.
    ///
    /// # Errors
    /// Returns `PriceError::InvalidPrice` if `price` is not finite and positive.
    /// The active source is unchanged in that case.
    pub async fn set_manual_price(&self, price: Option<f64>) -> Result<(), PriceError> {
        let mut config = self.inner.config.write().await;
        let mut source = self.inner.active_source.write().await;
        let mut last = self.inner.last_price.write().await;

        match price {
            Some(value) => {
                let fixed = FixedPrice::new(value)?;
                tracing::info!("Switching to manual BTC price {}", fixed.price());
                *last = Some(PriceSnapshot::new(fixed.price(), fixed.name()));
                *source = Arc::new(fixed);
                config.manual_price = Some(value);
            }
            None => {
                tracing::info!(
                    "Clearing manual BTC price, using {}",
                    self.inner.configured_source.name()
                );
                // A manual quote must not linger as if it were live
                if last.as_ref().is_some_and(|s| s.source == "manual") {
                    *last = None;
                }
                *source = self.inner.configured_source.clone();
                config.manual_price = None;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::test_support::{SlowSource, StubSource};

    #[tokio::test]
    async fn test_fetch_success_updates_snapshot() {
        let state = StubSource::state(vec![Ok(60_000.0), Ok(61_000.0)]);
        assert!(state.last_price().await.is_none());

        let snapshot = state.fetch_price().await.unwrap();
        assert_eq!(snapshot.price.value(), 60_000.0);
        assert_eq!(snapshot.source, "stub");

        state.fetch_price().await.unwrap();
        assert_eq!(state.last_price().await.unwrap().price.value(), 61_000.0);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_last_price() {
        let state = StubSource::state(vec![Ok(60_000.0), Err(503)]);

        state.fetch_price().await.unwrap();
        let err = state.fetch_price().await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(503));
        assert_eq!(state.last_price().await.unwrap().price.value(), 60_000.0);
    }

    #[tokio::test]
    async fn test_manual_price_round_trip() {
        let state = StubSource::state(vec![Ok(60_000.0)]);

        state.set_manual_price(Some(55_000.0)).await.unwrap();
        assert_eq!(state.price_source().await.name(), "manual");
        assert_eq!(state.config().await.manual_price, Some(55_000.0));
        assert_eq!(state.last_price().await.unwrap().price.value(), 55_000.0);
        assert_eq!(state.fetch_price().await.unwrap().price.value(), 55_000.0);

        state.set_manual_price(None).await.unwrap();
        assert_eq!(state.price_source().await.name(), "stub");
        assert!(state.last_price().await.is_none());
        assert!(state.config().await.manual_price.is_none());
        assert_eq!(state.fetch_price().await.unwrap().price.value(), 60_000.0);
    }

    #[tokio::test]
    async fn test_inflight_fetch_does_not_replace_manual_price() {
        let source = Arc::new(SlowSource::new(Duration::from_millis(200), 70_000.0));
        let state = AppState::with_source(AppConfig::default(), source);

        let fetching = tokio::spawn({
            let state = state.clone();
            async move { state.fetch_price().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        state.set_manual_price(Some(55_000.0)).await.unwrap();

        let quote = fetching.await.unwrap().unwrap();
        assert_eq!(quote.price.value(), 70_000.0);

        let snapshot = state.last_price().await.unwrap();
        assert_eq!(snapshot.price.value(), 55_000.0);
        assert_eq!(snapshot.source, "manual");
    }

    #[tokio::test]
    async fn test_invalid_manual_price_leaves_source() {
        let state = StubSource::state(vec![]);
        let err = state.set_manual_price(Some(-3.0)).await.unwrap_err();
        assert_eq!(err.error_code(), "invalid_price");
        assert_eq!(state.price_source().await.name(), "stub");
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.price.timeout_secs = 0;
        assert!(matches!(
            AppState::with_config(config),
            Err(StateError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_with_config_uses_manual_price() {
        let mut config = AppConfig::default();
        config.manual_price = Some(70_000.0);
        let state = AppState::with_config(config).unwrap();
        assert_eq!(state.price_source().await.name(), "manual");
    }
}
