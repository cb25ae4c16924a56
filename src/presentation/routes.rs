// Router for the gateway
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_telemetry, health_check, telemetry_preflight};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/telemetry", get(get_telemetry).options(telemetry_preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
