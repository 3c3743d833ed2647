//! Role requirements for individual routes.
//!
//! Two ways to use them:
//! 1. Route layers: `route_layer(middleware::from_fn(require_admin))`
//! 2. Extractors: take [`RequireAdmin`] as a handler argument
//!
//! Both answer a bare `401` when there is no principal and a bare `403` when
//! the principal lacks every allowed role.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokengate_auth::Principal;
use tokengate_auth::roles::{ROLE_ADMIN, ROLE_USER};

use crate::middleware::auth::SecurityContext;

/// Checks the request's principal against `allowed_roles`.
pub fn check_any_role(
    context: Option<&SecurityContext>,
    allowed_roles: &[&str],
) -> Result<(), StatusCode> {
    let principal = context
        .and_then(SecurityContext::principal)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !principal.has_any_role(allowed_roles) {
        tracing::debug!(
            username = principal.username(),
            required = ?allowed_roles,
            "access denied"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(())
}

/// Middleware body shared by the role layers below.
///
/// ```rust,ignore
/// use axum::{Router, middleware};
///
/// let routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .route_layer(middleware::from_fn(|req, next| {
///         require_roles(req, next, &["ROLE_AUDITOR"])
///     }));
/// ```
pub async fn require_roles(req: Request, next: Next, allowed_roles: &[&str]) -> Response {
    match check_any_role(req.extensions().get::<SecurityContext>(), allowed_roles) {
        Ok(()) => next.run(req).await,
        Err(status) => status.into_response(),
    }
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, &[ROLE_ADMIN]).await
}

/// Any signed-in account: plain users and administrators.
pub async fn require_user(req: Request, next: Next) -> Response {
    require_roles(req, next, &[ROLE_USER, ROLE_ADMIN]).await
}

/// Extractor that only yields a principal holding `ROLE_ADMIN`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Principal);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts.extensions.get::<SecurityContext>();
        check_any_role(context, &[ROLE_ADMIN])?;

        context
            .and_then(SecurityContext::principal)
            .cloned()
            .map(RequireAdmin)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(roles: &[&str]) -> SecurityContext {
        SecurityContext::authenticated(Principal::new("alice", roles.iter().copied()))
    }

    #[test]
    fn test_missing_context_is_unauthorized() {
        assert_eq!(
            check_any_role(None, &[ROLE_USER]),
            Err(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            check_any_role(Some(&SecurityContext::default()), &[ROLE_USER]),
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn test_missing_role_is_forbidden() {
        let context = context_with(&[ROLE_USER]);
        assert_eq!(
            check_any_role(Some(&context), &[ROLE_ADMIN]),
            Err(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn test_any_allowed_role_passes() {
        let context = context_with(&[ROLE_ADMIN]);
        assert_eq!(check_any_role(Some(&context), &[ROLE_USER, ROLE_ADMIN]), Ok(()));
    }

    #[test]
    fn test_no_roles_is_forbidden() {
        let context = context_with(&[]);
        assert_eq!(
            check_any_role(Some(&context), &[ROLE_USER, ROLE_ADMIN]),
            Err(StatusCode::FORBIDDEN)
        );
    }

    #[tokio::test]
    async fn test_require_admin_extractor() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();
        parts.extensions.insert(context_with(&[ROLE_USER, ROLE_ADMIN]));

        let RequireAdmin(principal) = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(principal.username(), "alice");
    }
}
