use axum::{http::StatusCode, Json};
use shared::HealthResponse;

/// Liveness probe
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}
