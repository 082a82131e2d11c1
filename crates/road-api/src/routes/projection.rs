//! Goal projection endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use projection::{parse_amount, parse_price, project, ProjectionInput};
use road_core::UsdPrice;

use crate::dto::{ProjectionQuery, ProjectionResponse};
use crate::AppState;

/// GET /projection?holdings=..&monthly=..[&price=..] - Project months to 1 BTC.
///
/// Inputs are parsed leniently and never rejected. Without an explicit
/// `price`, the last known price is used; if there is none the projection
/// reports the price as unavailable.
pub async fn get_projection(
    State(state): State<AppState>,
    Query(query): Query<ProjectionQuery>,
) -> Json<ProjectionResponse> {
    let holdings = query.holdings.as_deref().map(parse_amount).unwrap_or(0.0);
    let monthly = query.monthly.as_deref().map(parse_amount).unwrap_or(0.0);

    let (price, source) = match query.price.as_deref() {
        Some(text) => (
            parse_price(text).and_then(UsdPrice::new),
            Some("query".to_string()),
        ),
        None => match state.last_price().await {
            Some(snapshot) => (Some(snapshot.price), Some(snapshot.source)),
            None => (None, None),
        },
    };
    let source = price.and(source);

    let projection = project(&ProjectionInput::new(
        holdings,
        monthly,
        price.map(|p| p.value()),
    ));

    Json(ProjectionResponse::new(projection, price, source))
}
