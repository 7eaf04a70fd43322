use axum::Json;
use tracing::instrument;

use crate::middleware::auth::{AuthUser, Principal};
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;

/// Greeting for any authenticated principal
#[utoipa::path(
    get,
    path = "/private",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or bad credentials", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "Private"
)]
pub async fn hello_private(_auth_user: AuthUser) -> &'static str {
    "Hello! PRIVATE"
}

/// Greeting for administrators only
#[utoipa::path(
    get,
    path = "/private/admin",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or bad credentials", body = ErrorResponse),
        (status = 403, description = "Principal lacks the ADMIN role", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "Private"
)]
#[instrument(skip_all, fields(username = %admin.username()))]
pub async fn hello_admin(RequireAdmin(admin): RequireAdmin) -> &'static str {
    "Hello! ADMIN PRIVATE"
}

/// The authenticated principal and its roles
#[utoipa::path(
    get,
    path = "/private/me",
    responses(
        (status = 200, description = "Current principal", body = Principal),
        (status = 401, description = "Missing or bad credentials", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "Private"
)]
pub async fn current_principal(AuthUser(principal): AuthUser) -> Json<Principal> {
    Json(principal)
}
