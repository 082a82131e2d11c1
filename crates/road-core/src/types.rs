//! Core type definitions for Road to 1 BTC

use serde::{Deserialize, Serialize};
use std::fmt;

/// BTC/USD spot price.
///
/// Only finite, strictly positive values can be represented. An unavailable
/// price is modelled as `Option<UsdPrice>::None`, never as zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UsdPrice(f64);

impl UsdPrice {
    /// Returns `None` for zero, negative, NaN, or infinite values
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UsdPrice {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("price must be finite and positive, got {}", value))
    }
}

impl From<UsdPrice> for f64 {
    fn from(price: UsdPrice) -> Self {
        price.0
    }
}

impl fmt::Display for UsdPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Constants
pub mod constants {
    /// Goal holdings in BTC
    pub const TARGET_BTC: f64 = 1.0;

    /// Months per year, for the year/month breakdown
    pub const MONTHS_PER_YEAR: u32 = 12;

    /// Coinbase BTC-USD spot endpoint
    pub const COINBASE_SPOT_URL: &str = "https://api.coinbase.com/v2/prices/BTC-USD/spot";

    /// User agent sent to the upstream quote service
    pub const DEFAULT_USER_AGENT: &str = "zero-to-1btc";
}
