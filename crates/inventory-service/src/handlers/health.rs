use axum::{http::StatusCode, Json};

use crate::{models::HealthStatus, service};

/// Service health report
#[utoipa::path(
    get,
    path = "/health",
    tag = "app",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health_check() -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(service::health_status()))
}
