use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Public liveness probe for clients
#[utoipa::path(
    get,
    path = "/api/hello",
    responses(
        (status = 200, description = "Always succeeds, with or without a token", body = String)
    ),
    tag = "Diagnostics"
)]
pub async fn hello() -> &'static str {
    "hello"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Diagnostics"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
