use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, TokenResponse};
use crate::modules::hello::controller::HealthResponse;
use crate::modules::users::model::{SignupRequest, UserResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::authenticate,
        crate::modules::users::controller::signup,
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::get_user,
        crate::modules::hello::controller::hello,
        crate::modules::hello::controller::health,
    ),
    components(
        schemas(
            LoginRequest,
            TokenResponse,
            SignupRequest,
            UserResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "Signup and account lookup"),
        (name = "Diagnostics", description = "Unauthenticated probes")
    ),
    info(
        title = "Tokengate API",
        version = "0.1.0",
        description = "Stateless HS512 bearer-token authentication built with Rust and Axum.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
