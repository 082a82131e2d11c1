//! Error types for Road to 1 BTC

use thiserror::Error;

/// Core errors that can occur in Road to 1 BTC
#[derive(Debug, Error)]
pub enum Error {
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Price retrieval errors
///
/// Every variant means the same thing to the calculator: the price is
/// unavailable. The distinction only matters for logging and HTTP status.
#[derive(Debug, Clone, Error)]
pub enum PriceError {
    #[error("Price source unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("Price request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Price source returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid price payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid price: {value}")]
    InvalidPrice { value: String },
}

/// Result type alias for Road to 1 BTC operations
pub type Result<T> = std::result::Result<T, Error>;

impl PriceError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "price_unreachable",
            Self::Timeout { .. } => "price_timeout",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::InvalidPayload { .. } => "invalid_payload",
            Self::InvalidPrice { .. } => "invalid_price",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPrice { .. } => 400,
            Self::Timeout { .. } => 504,
            Self::Unreachable { .. } | Self::UpstreamStatus { .. } | Self::InvalidPayload { .. } => {
                502
            }
        }
    }

    /// Message shown to API callers. Upstream details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPayload { .. } => "Invalid BTC price response",
            Self::InvalidPrice { .. } => "Invalid BTC price",
            _ => "Failed to fetch BTC price",
        }
    }

    /// Upstream HTTP status, if the source answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
