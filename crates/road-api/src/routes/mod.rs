//! API route handlers

pub mod health;
pub mod price;
pub mod projection;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/btc-price", get(price::get_btc_price))
        .route("/projection", get(projection::get_projection))
        .nest("/price", price::router())
        .with_state(state)
}
