//! Goal Projection Calculator
//!
//! Estimates how many months of a constant USD investment it takes to
//! accumulate 1 BTC at a given price.
//!
//! # Features
//!
//! - Pure projection math (months to goal, progress, USD valuation)
//! - Lenient parsing of free-text form values
//! - Display formatting for amounts, prices and durations
//!
//! # Example
//!
//! ```
//! use projection::{project, ProjectionInput};
//!
//! let result = project(&ProjectionInput::new(0.05, 300.0, Some(60_000.0)));
//! assert_eq!(result.months_to_goal, 190);
//! assert_eq!(result.breakdown.to_string(), "15 years, 10 months");
//! ```

pub mod calculator;
pub mod format;
pub mod input;

pub use calculator::*;
pub use format::*;
pub use input::{parse_amount, parse_price};
