//! road-api: HTTP API layer for Road to 1 BTC
//!
//! Serves the BTC price proxy and the goal projection over HTTP.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, PriceSnapshot, StateError};

#[cfg(test)]
pub(crate) mod test_support;
