use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::auth::Principal;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::RegisterResponse;
use warden_models::{CreateUserRequest, Role, UserResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::public::controller::hello_public,
        crate::modules::private::controller::hello_private,
        crate::modules::private::controller::hello_admin,
        crate::modules::private::controller::current_principal,
        crate::modules::auth::controller::register,
    ),
    components(
        schemas(
            Role,
            Principal,
            CreateUserRequest,
            UserResponse,
            RegisterResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Endpoints open to anyone"),
        (name = "Private", description = "Endpoints requiring HTTP Basic authentication"),
        (name = "Authentication", description = "User registration")
    ),
    info(
        title = "Warden API",
        version = "0.1.0",
        description = "HTTP Basic authentication with role-gated endpoints.",
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
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}
