//! BTC price endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};

use crate::dto::{
    ApiError, LastPriceResponse, ManualPriceRequest, ManualPriceResponse, PriceErrorResponse,
    PriceResponse,
};
use crate::AppState;

/// Create price routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/last", get(get_last_price))
        .route("/manual", post(set_manual_price))
}

/// GET /api/btc-price - Fetch a fresh BTC/USD price through the server.
///
/// Upstream failures are reported as a 500 with a generic message; details
/// only go to the logs.
pub async fn get_btc_price(
    State(state): State<AppState>,
) -> Result<
    ([(header::HeaderName, &'static str); 1], Json<PriceResponse>),
    (StatusCode, Json<PriceErrorResponse>),
> {
    let snapshot = state.fetch_price().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PriceErrorResponse {
                error: e.public_message().to_string(),
                status: e.upstream_status(),
            }),
        )
    })?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(PriceResponse {
            price: snapshot.price.value(),
        }),
    ))
}

/// GET /price/last - Last successfully fetched price, without contacting the source
pub async fn get_last_price(State(state): State<AppState>) -> Json<LastPriceResponse> {
    let response = match state.last_price().await {
        Some(snapshot) => LastPriceResponse {
            available: true,
            price: Some(snapshot.price.value()),
            source: Some(snapshot.source),
            fetched_at_unix: Some(snapshot.fetched_at_unix),
        },
        None => LastPriceResponse {
            available: false,
            price: None,
            source: None,
            fetched_at_unix: None,
        },
    };
    Json(response)
}

/// POST /price/manual - Use a manually entered price, or `null` for the live source
pub async fn set_manual_price(
    State(state): State<AppState>,
    Json(request): Json<ManualPriceRequest>,
) -> Result<Json<ManualPriceResponse>, (StatusCode, Json<ApiError>)> {
    state.set_manual_price(request.price).await.map_err(|e| {
        (
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST),
            Json(ApiError::new(e.error_code(), e.to_string())),
        )
    })?;

    let source = state.price_source().await;
    Ok(Json(ManualPriceResponse {
        source: source.name().to_string(),
        manual_price: state.config().await.manual_price,
    }))
}
