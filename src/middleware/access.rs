//! Declarative path rules and the access decision middleware.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::SecurityContext;
use crate::state::AppState;

/// Authentication state a path requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one non-empty segment
    Any,
    /// `**`: everything that follows, possibly nothing
    Rest,
}

/// A path pattern such as `/api/user/*` or `/docs/**`.
///
/// Matching is segment by segment and case-sensitive. A trailing slash is a
/// segment of its own, so `/api/hello/` does not match `/api/hello`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment {
                "**" => Segment::Rest,
                "*" => Segment::Any,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();

        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Any => match parts.next() {
                    Some(part) if !part.is_empty() => {}
                    _ => return false,
                },
                Segment::Literal(literal) => {
                    if parts.next() != Some(literal.as_str()) {
                        return false;
                    }
                }
            }
        }

        parts.next().is_none()
    }
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub access: Access,
}

/// Ordered rule table. The first matching rule wins and an unmatched path
/// requires authentication.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct AccessRules {
    rules: Vec<AccessRule>,
}

impl AccessRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permit(mut self, pattern: &str) -> Self {
        self.rules.push(AccessRule {
            pattern: PathPattern::new(pattern),
            access: Access::Public,
        });
        self
    }

    pub fn authenticate(mut self, pattern: &str) -> Self {
        self.rules.push(AccessRule {
            pattern: PathPattern::new(pattern),
            access: Access::Authenticated,
        });
        self
    }

    pub fn resolve(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated)
    }

    /// The table the server runs with.
    pub fn api_defaults() -> Self {
        Self::new()
            .permit("/api/hello")
            .permit("/api/authenticate")
            .permit("/api/signup")
            .permit("/health")
            .permit("/metrics")
            .permit("/scalar")
            .permit("/api-docs/openapi.json")
            .authenticate("/api/**")
    }
}

/// Rejects with a bare `401` when the path requires authentication and the
/// gate installed no principal.
pub async fn access_decision(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let authenticated = req
        .extensions()
        .get::<SecurityContext>()
        .is_some_and(SecurityContext::is_authenticated);

    match state.access_rules.resolve(req.uri().path()) {
        Access::Authenticated if !authenticated => StatusCode::UNAUTHORIZED.into_response(),
        _ => next.run(req).await,
    }
}
