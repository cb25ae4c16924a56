// HTTP request handlers
use crate::domain::telemetry::QueryResult;
use crate::infrastructure::http_response::{cors_json_response, preflight_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_RANGE: &str = "1h";

#[derive(Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Telemetry for the requested lookback range
pub async fn get_telemetry(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let range = query
        .range
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_RANGE);

    match state.telemetry_service.fetch_telemetry(range).await {
        Ok(records) => cors_json_response(StatusCode::OK, QueryResult::success(records)),
        Err(e) => e.into_response(),
    }
}

/// CORS pre-flight for the telemetry endpoint
pub async fn telemetry_preflight() -> Response {
    preflight_response()
}
