use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::authenticate;

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/authenticate", post(authenticate))
}
