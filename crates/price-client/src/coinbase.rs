//! Coinbase spot price client
//!
//! Queries `GET /v2/prices/BTC-USD/spot`, which answers with
//! `{"data": {"amount": "64123.45", "base": "BTC", "currency": "USD"}}`.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use road_core::{PriceError, PriceSourceConfig, UsdPrice};
use serde_json::Value;

use crate::{timed_request, PriceSource, Result};

/// Longest upstream body kept in errors and logs
const MAX_BODY_IN_ERROR: usize = 512;

/// Live price source backed by the Coinbase public API
#[derive(Clone)]
pub struct CoinbaseClient {
    http: reqwest::Client,
    config: PriceSourceConfig,
}

impl CoinbaseClient {
    pub fn new(config: PriceSourceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PriceError::Unreachable {
                url: config.url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Fetch a fresh spot price. Responses are never cached.
    pub async fn fetch_spot(&self) -> Result<UsdPrice> {
        timed_request(self.timeout(), self.request_spot()).await
    }

    async fn request_spot(&self) -> Result<UsdPrice> {
        let url = &self.config.url;

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| PriceError::Unreachable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_body(&mut body);
            tracing::error!(status = status.as_u16(), body = %body, "Coinbase fetch failed");
            return Err(PriceError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            tracing::error!("Coinbase returned a non-JSON body: {}", e);
            PriceError::InvalidPayload {
                message: format!("response is not JSON: {}", e),
            }
        })?;

        parse_spot_response(&json).inspect_err(|_| {
            tracing::error!(payload = %json, "Unexpected Coinbase response");
        })
    }
}

impl PriceSource for CoinbaseClient {
    fn name(&self) -> &str {
        "coinbase"
    }

    fn spot_price(&self) -> BoxFuture<'_, Result<UsdPrice>> {
        self.fetch_spot().boxed()
    }
}

/// Extract the price from a Coinbase spot payload.
///
/// `data.amount` is normally a decimal string, but a bare number is
/// accepted too. Anything that is not a finite, positive number is rejected.
pub fn parse_spot_response(json: &Value) -> Result<UsdPrice> {
    let amount = json
        .get("data")
        .and_then(|data| data.get("amount"))
        .ok_or_else(|| PriceError::InvalidPayload {
            message: "missing data.amount".to_string(),
        })?;

    let value = match amount {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| PriceError::InvalidPayload {
        message: format!("data.amount is not numeric: {}", amount),
    })?;

    UsdPrice::new(value).ok_or_else(|| PriceError::InvalidPayload {
        message: format!("data.amount is not a usable price: {}", value),
    })
}

fn truncate_body(body: &mut String) {
    if body.len() > MAX_BODY_IN_ERROR {
        let mut cut = MAX_BODY_IN_ERROR;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
}
