#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tokengate::router::init_router;
use tokengate::state::AppState;
use tokengate_auth::roles::{ROLE_ADMIN, ROLE_USER};
use tokengate_auth::{SigningKey, TokenCodec};
use tokengate_core::hash_password_with_cost;
use tokengate_db::{InMemoryUserStore, UserRecord};

pub const TEST_PASSWORD: &str = "password123";
pub const TOKEN_VALIDITY_SECONDS: i64 = 3600;

const FAST_COST: u32 = 4;

pub fn test_codec() -> TokenCodec {
    let key = SigningKey::from_bytes(&[42u8; 64]).unwrap();
    TokenCodec::new(key, TOKEN_VALIDITY_SECONDS)
}

fn user(username: &str, nickname: &str, activated: bool, roles: &[&str]) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        password_hash: hash_password_with_cost(TEST_PASSWORD, FAST_COST).unwrap(),
        nickname: nickname.to_string(),
        activated,
        authorities: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// alice (ROLE_USER), admin (ROLE_USER + ROLE_ADMIN) and a deactivated
/// account, all with [`TEST_PASSWORD`].
pub fn seeded_store() -> InMemoryUserStore {
    InMemoryUserStore::with_users([
        user("alice", "Alice", true, &[ROLE_USER]),
        user("admin", "Administrator", true, &[ROLE_USER, ROLE_ADMIN]),
        user("dormant", "Dormant", false, &[ROLE_USER]),
    ])
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(seeded_store()), test_codec())
}

pub fn setup_test_app() -> Router {
    init_router(test_state())
}

pub fn token_for(username: &str, roles: &[&str]) -> String {
    test_codec().encode(username, roles.iter().copied()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_authorization(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    get_with_authorization(uri, &format!("Bearer {}", token))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
