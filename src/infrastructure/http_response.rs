// HTTP response utilities for the telemetry endpoint
use crate::application::telemetry_service::GatewayError;
use crate::domain::telemetry::QueryResult;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

const ANY_ORIGIN: &str = "*";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON body readable from any origin.
pub fn cors_json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ANY_ORIGIN),
        )],
        Json(body),
    )
        .into_response()
}

/// Answer to a CORS pre-flight probe; never touches the store.
pub fn preflight_response() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ANY_ORIGIN),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
        ],
        "",
    )
        .into_response()
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::InvalidRange(ref range) => {
                tracing::debug!(range = %range, "Rejected telemetry range");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            GatewayError::StoreQuery(message) => cors_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                QueryResult::failure(message),
            ),
        }
    }
}
