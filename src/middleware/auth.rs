use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tokengate_auth::{Principal, TokenCodec};
use tokengate_observability::track_token_rejected;

use crate::middleware::access::Access;
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Who, if anyone, is making the current request.
///
/// One instance is created per request by [`authentication_gate`] and lives in
/// the request extensions, so it is dropped together with the request.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// Returns the token carried by an `Authorization: Bearer <token>` header.
///
/// Any other scheme, a non-ASCII value or an empty token counts as no token.
pub fn resolve_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Builds the security context for a set of request headers.
pub fn authenticate(tokens: &TokenCodec, headers: &HeaderMap) -> SecurityContext {
    let Some(token) = resolve_bearer(headers) else {
        return SecurityContext::default();
    };

    match tokens.decode(token) {
        Ok(claims) => SecurityContext::authenticated(Principal::from(claims)),
        Err(rejection) => {
            tracing::info!(reason = rejection.as_str(), "{}", rejection);
            track_token_rejected(rejection.as_str());
            SecurityContext::default()
        }
    }
}

/// Installs a [`SecurityContext`] for every request and always continues.
///
/// Public paths get an empty context without the token being looked at.
pub async fn authentication_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = match state.access_rules.resolve(req.uri().path()) {
        Access::Public => SecurityContext::default(),
        Access::Authenticated => authenticate(&state.tokens, req.headers()),
    };

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Extractor for the authenticated principal.
///
/// Rejects with a bare `401` when the gate installed no principal.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(SecurityContext::principal)
            .cloned()
            .map(AuthUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};
    use tokengate_auth::SigningKey;

    fn get_test_codec() -> TokenCodec {
        TokenCodec::new(SigningKey::from_bytes(&[7u8; 64]).unwrap(), 3600)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_resolve_bearer_strips_prefix() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(resolve_bearer(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_resolve_bearer_ignores_other_schemes() {
        assert_eq!(resolve_bearer(&headers_with("Basic YWxpY2U6c2VjcmV0")), None);
        assert_eq!(resolve_bearer(&headers_with("bearer abc")), None);
        assert_eq!(resolve_bearer(&headers_with("Bearer ")), None);
        assert_eq!(resolve_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate_with_valid_token() {
        let codec = get_test_codec();
        let token = codec.encode("alice", ["ROLE_USER"]).unwrap();

        let context = authenticate(&codec, &headers_with(&format!("Bearer {token}")));

        let principal = context.principal().unwrap();
        assert_eq!(principal.username(), "alice");
        assert!(principal.has_role("ROLE_USER"));
    }

    #[test]
    fn test_authenticate_without_header_is_empty() {
        let context = authenticate(&get_test_codec(), &HeaderMap::new());
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_authenticate_with_garbage_is_empty() {
        let context = authenticate(&get_test_codec(), &headers_with("Bearer not-a-token"));
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_authenticate_with_expired_token_is_empty() {
        let codec = get_test_codec();
        let token = codec
            .encode_at("alice", ["ROLE_USER"], Utc::now() - Duration::hours(2))
            .unwrap();

        let context = authenticate(&codec, &headers_with(&format!("Bearer {token}")));

        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_authenticate_with_foreign_key_is_empty() {
        let foreign = TokenCodec::new(SigningKey::from_bytes(&[1u8; 64]).unwrap(), 3600);
        let token = foreign.encode("mallory", ["ROLE_ADMIN"]).unwrap();

        let context = authenticate(&get_test_codec(), &headers_with(&format!("Bearer {token}")));

        assert!(context.principal().is_none());
    }

    #[tokio::test]
    async fn test_auth_user_extractor_rejects_empty_context() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();
        parts.extensions.insert(SecurityContext::default());

        let result = AuthUser::from_request_parts(&mut parts, &()).await;

        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_user_extractor_returns_principal() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();
        parts
            .extensions
            .insert(SecurityContext::authenticated(Principal::new("bob", ["ROLE_USER"])));

        let AuthUser(principal) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(principal.username(), "bob");
    }
}
