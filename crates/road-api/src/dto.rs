//! Data Transfer Objects for API requests and responses

use projection::{format_btc, format_months, format_pct, format_price, format_usd, Projection};
use road_core::UsdPrice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// BTC price proxy success body: `{ "price": number }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price: f64,
}

/// BTC price proxy failure body: `{ "error": string, "status"?: number }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceErrorResponse {
    pub error: String,
    /// Upstream HTTP status, when the upstream answered with an error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Read a price proxy body the way callers must: anything other than a
/// numeric, usable `price` field means the price is unavailable.
pub fn price_from_body(body: &Value) -> Option<UsdPrice> {
    body.get("price")
        .and_then(Value::as_f64)
        .and_then(UsdPrice::new)
}

/// Last known price response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastPriceResponse {
    pub available: bool,
    pub price: Option<f64>,
    pub source: Option<String>,
    pub fetched_at_unix: Option<u64>,
}

/// Manual price request. `null` restores the live source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPriceRequest {
    #[serde(default)]
    pub price: Option<f64>,
}

/// Active price source after a manual price change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPriceResponse {
    pub source: String,
    pub manual_price: Option<f64>,
}

/// Projection query. Values are raw form text and are parsed leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionQuery {
    pub holdings: Option<String>,
    pub monthly: Option<String>,
    /// Overrides the last known price when present
    pub price: Option<String>,
}

/// Projection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResponse {
    #[serde(flatten)]
    pub projection: Projection,
    pub price: Option<f64>,
    pub price_source: Option<String>,
    pub price_available: bool,
    pub display: ProjectionDisplay,
}

/// Human-readable renderings of a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionDisplay {
    pub price: Option<String>,
    pub holdings_usd: Option<String>,
    pub monthly_btc: String,
    pub months_to_goal: String,
    pub duration: Option<String>,
    pub progress_pct: String,
}

impl ProjectionResponse {
    pub fn new(projection: Projection, price: Option<UsdPrice>, price_source: Option<String>) -> Self {
        let display = ProjectionDisplay {
            price: price.map(|p| format_price(p.value())),
            holdings_usd: projection.holdings_usd.map(format_usd),
            monthly_btc: format_btc(projection.monthly_btc),
            months_to_goal: format_months(projection.months_to_goal),
            duration: (projection.months_to_goal > 0).then(|| projection.breakdown.to_string()),
            progress_pct: format_pct(projection.progress_pct),
        };

        Self {
            projection,
            price: price.map(|p| p.value()),
            price_source,
            price_available: price.is_some(),
            display,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
