//! Scripted price source for handler and state tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use price_client::PriceSource;
use road_core::{AppConfig, PriceError, UsdPrice};

use crate::AppState;

/// Replays queued quotes. `Ok(price)` is returned as-is (even if unusable,
/// which then surfaces as an invalid payload), `Err(status)` as an upstream
/// HTTP error. An empty queue reports the source as unreachable.
pub struct StubSource {
    quotes: Mutex<VecDeque<Result<f64, u16>>>,
}

impl StubSource {
    pub fn new(quotes: Vec<Result<f64, u16>>) -> Self {
        Self {
            quotes: Mutex::new(quotes.into()),
        }
    }

    /// App state backed by a stub with the given quotes
    pub fn state(quotes: Vec<Result<f64, u16>>) -> AppState {
        AppState::with_source(AppConfig::default(), Arc::new(Self::new(quotes)))
    }
}

impl PriceSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn spot_price(&self) -> BoxFuture<'_, Result<UsdPrice, PriceError>> {
        let next = self
            .quotes
            .lock()
            .map(|mut quotes| quotes.pop_front())
            .unwrap_or(None);

        let result = match next {
            Some(Ok(value)) => UsdPrice::new(value).ok_or(PriceError::InvalidPayload {
                message: format!("unusable amount {}", value),
            }),
            Some(Err(status)) => Err(PriceError::UpstreamStatus {
                status,
                body: String::new(),
            }),
            None => Err(PriceError::Unreachable {
                url: "stub://".to_string(),
                message: "no quotes left".to_string(),
            }),
        };
        future::ready(result).boxed()
    }
}

/// Quotes `price` after sleeping for `delay`
pub struct SlowSource {
    delay: Duration,
    price: f64,
}

impl SlowSource {
    pub fn new(delay: Duration, price: f64) -> Self {
        Self { delay, price }
    }
}

impl PriceSource for SlowSource {
    fn name(&self) -> &str {
        "slow"
    }

    fn spot_price(&self) -> BoxFuture<'_, Result<UsdPrice, PriceError>> {
        async move {
            tokio::time::sleep(self.delay).await;
            UsdPrice::new(self.price).ok_or(PriceError::InvalidPayload {
                message: format!("unusable amount {}", self.price),
            })
        }
        .boxed()
    }
}
