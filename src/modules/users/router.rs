use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_admin, require_user};
use crate::state::AppState;

use super::controller::{get_current_user, get_user, signup};

pub fn init_signup_router() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

pub fn init_users_router() -> Router<AppState> {
    let current_user = Router::new()
        .route("/", get(get_current_user))
        .route_layer(middleware::from_fn(require_user));

    let by_username = Router::new()
        .route("/{username}", get(get_user))
        .route_layer(middleware::from_fn(require_admin));

    current_user.merge(by_username)
}
