//! price-client: BTC/USD spot price sources
//!
//! This crate provides the [`PriceSource`] seam used by the API layer, with
//! a live Coinbase-backed implementation and a fixed (manually entered) one.

pub mod coinbase;
pub mod fixed;

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use road_core::{AppConfig, PriceError, UsdPrice};

pub use coinbase::{parse_spot_response, CoinbaseClient};
pub use fixed::FixedPrice;

/// Result type for price source operations
pub type Result<T> = std::result::Result<T, PriceError>;

/// Anything that can quote the current BTC/USD price.
///
/// Implementations return either a usable price or an error; callers never
/// need to re-check the value beyond what [`UsdPrice`] already guarantees.
pub trait PriceSource: Send + Sync {
    /// Short name for logs and snapshots (e.g. "coinbase", "manual")
    fn name(&self) -> &str;

    /// Fetch the current spot price
    fn spot_price(&self) -> BoxFuture<'_, Result<UsdPrice>>;
}

/// Build the price source described by the config.
///
/// A configured manual price takes precedence over the live source.
pub fn source_from_config(config: &AppConfig) -> Result<Arc<dyn PriceSource>> {
    if let Some(manual) = config.manual_price {
        let fixed = FixedPrice::new(manual)?;
        tracing::info!("Using manual BTC price: {}", fixed.price());
        return Ok(Arc::new(fixed));
    }

    let client = CoinbaseClient::new(config.price.clone())?;
    tracing::info!("Using live BTC price from {}", config.price.url);
    Ok(Arc::new(client))
}

/// Run a request future with a timeout, mapping elapsed time to [`PriceError::Timeout`]
pub(crate) async fn timed_request<T>(
    timeout: Duration,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| PriceError::Timeout {
            secs: timeout.as_secs(),
        })?
}
