//! Manually entered price

use futures::future::{self, BoxFuture, FutureExt};
use road_core::{PriceError, UsdPrice};

use crate::{PriceSource, Result};

/// A price source that always quotes the same, user-supplied price
#[derive(Debug, Clone, Copy)]
pub struct FixedPrice {
    price: UsdPrice,
}

impl FixedPrice {
    pub fn new(price: f64) -> Result<Self> {
        UsdPrice::new(price)
            .map(|price| Self { price })
            .ok_or_else(|| PriceError::InvalidPrice {
                value: price.to_string(),
            })
    }

    pub fn price(&self) -> UsdPrice {
        self.price
    }
}

impl PriceSource for FixedPrice {
    fn name(&self) -> &str {
        "manual"
    }

    fn spot_price(&self) -> BoxFuture<'_, Result<UsdPrice>> {
        future::ready(Ok(self.price)).boxed()
    }
}
