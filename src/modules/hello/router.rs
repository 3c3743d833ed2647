use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::hello;

pub fn init_hello_router() -> Router<AppState> {
    Router::new().route("/hello", get(hello))
}
