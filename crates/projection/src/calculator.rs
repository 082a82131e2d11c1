//! Goal Projection Calculator
//!
//! Pure math functions for projecting progress towards the 1 BTC goal.
//! No I/O, no async - just deterministic calculations.
//!
//! # Units
//!
//! - Holdings and remaining amounts: BTC (f64)
//! - Monthly investment and valuations: USD (f64)
//! - Price: USD per 1 BTC
//!
//! Inputs are never rejected. Non-finite or negative values are treated as 0,
//! and an unusable price makes the projection report 0 months rather than
//! dividing by zero.

use std::fmt;

use road_core::constants::{MONTHS_PER_YEAR, TARGET_BTC};
use road_core::UsdPrice;
use serde::{Deserialize, Serialize};

/// Raw calculator inputs, as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// BTC currently owned
    pub holdings: f64,
    /// USD invested every month
    pub monthly_investment_usd: f64,
    /// USD per BTC, `None` when no quote is available
    pub price: Option<f64>,
}

impl ProjectionInput {
    pub fn new(holdings: f64, monthly_investment_usd: f64, price: Option<f64>) -> Self {
        Self {
            holdings,
            monthly_investment_usd,
            price,
        }
    }
}

/// Projected progress towards the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Holdings after input coercion (not clamped to the goal)
    pub holdings_btc: f64,
    /// BTC still missing to reach the goal
    pub remaining_btc: f64,
    /// BTC bought each month at the current price
    pub monthly_btc: f64,
    /// First month at which the goal is met; 0 when already met or not computable
    pub months_to_goal: u32,
    /// Share of the goal already held, 0..=100
    pub progress_pct: f64,
    /// USD value of current holdings, `None` without a price
    pub holdings_usd: Option<f64>,
    /// `months_to_goal` split into years and months
    pub breakdown: Breakdown,
}

impl Projection {
    pub fn goal_reached(&self) -> bool {
        self.remaining_btc <= 0.0
    }

    pub fn price_available(&self) -> bool {
        self.holdings_usd.is_some()
    }
}

/// Years and months of a month count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub years: u32,
    pub months: u32,
}

impl Breakdown {
    pub fn from_months(total: u32) -> Self {
        Self {
            years: total / MONTHS_PER_YEAR,
            months: total % MONTHS_PER_YEAR,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years
            .saturating_mul(MONTHS_PER_YEAR)
            .saturating_add(self.months)
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(n: u32, singular: &str) -> String {
            if n == 1 {
                format!("1 {}", singular)
            } else {
                format!("{} {}s", n, singular)
            }
        }

        match (self.years, self.months) {
            (0, m) => write!(f, "{}", unit(m, "month")),
            (y, 0) => write!(f, "{}", unit(y, "year")),
            (y, m) => write!(f, "{}, {}", unit(y, "year"), unit(m, "month")),
        }
    }
}

/// Coerce a raw input: non-finite or negative becomes 0
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// BTC missing to reach the goal
pub fn remaining_btc(holdings: f64) -> f64 {
    let held = sanitize(holdings).min(TARGET_BTC);
    (TARGET_BTC - held).max(0.0)
}

/// BTC bought per month; 0 without a usable price
pub fn monthly_btc(monthly_investment_usd: f64, price: Option<UsdPrice>) -> f64 {
    match price {
        Some(price) => sanitize(monthly_investment_usd) / price.value(),
        None => 0.0,
    }
}

/// Months until `remaining` is covered, rounded up so the result is the
/// first month at which the goal is met or exceeded.
pub fn months_to_goal(remaining: f64, monthly_btc: f64) -> u32 {
    let remaining = sanitize(remaining);
    let monthly_btc = sanitize(monthly_btc);
    if remaining <= 0.0 || monthly_btc <= 0.0 {
        return 0;
    }

    let months = (remaining / monthly_btc).ceil();
    if months >= u32::MAX as f64 {
        u32::MAX
    } else {
        months as u32
    }
}

/// Share of the goal already held, capped at 100
pub fn progress_pct(holdings: f64) -> f64 {
    (sanitize(holdings) / TARGET_BTC * 100.0).clamp(0.0, 100.0)
}

/// USD value of holdings; `None` without a usable price
pub fn holdings_usd(holdings: f64, price: Option<UsdPrice>) -> Option<f64> {
    price.map(|p| sanitize(holdings) * p.value())
}

/// Calculate the full projection from raw inputs
pub fn project(input: &ProjectionInput) -> Projection {
    let holdings = sanitize(input.holdings);
    let price = input.price.and_then(UsdPrice::new);

    let remaining = remaining_btc(holdings);
    let monthly = monthly_btc(input.monthly_investment_usd, price);
    let months = months_to_goal(remaining, monthly);

    Projection {
        holdings_btc: holdings,
        remaining_btc: remaining,
        monthly_btc: monthly,
        months_to_goal: months,
        progress_pct: progress_pct(holdings),
        holdings_usd: holdings_usd(holdings, price),
        breakdown: Breakdown::from_months(months),
    }
}
