use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use tokengate_core::AppError;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::BEARER_PREFIX;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, TokenResponse};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/authenticate",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token also returned in the Authorization header", body = TokenResponse),
        (status = 400, description = "Bad request - missing field, malformed body or validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = AuthService::authenticate(state.users.as_ref(), &state.tokens, dto).await?;
    let bearer = format!("{}{}", BEARER_PREFIX, response.access_token);

    Ok(([(header::AUTHORIZATION, bearer)], Json(response)))
}
