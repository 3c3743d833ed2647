use axum::http::{HeaderValue, Method, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, extract::State, middleware};
use tokengate_observability::logging_middleware;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::middleware::access::access_decision;
use crate::middleware::auth::authentication_gate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::hello::controller::health;
use crate::modules::hello::router::init_hello_router;
use crate::modules::users::router::{init_signup_router, init_users_router};
use crate::state::AppState;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Builds the full application.
///
/// Layers run top to bottom: logging, CORS, the authentication gate, then
/// the access decision. Role checks sit on individual route groups.
pub fn init_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .merge(init_hello_router())
                .merge(init_auth_router())
                .merge(init_signup_router())
                .nest("/user", init_users_router()),
        );

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics_handler));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(cors_layer(&state))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    authentication_gate,
                ))
                .layer(middleware::from_fn_with_state(state.clone(), access_decision)),
        )
        .with_state(state)
}
