use anyhow::anyhow;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;
use warden_core::AppError;
use warden_models::{CreateUserRequest, UserResponse};

use crate::metrics::track_user_registered;
use crate::modules::auth::model::RegisterResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user with the USER role
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    // Provisioned accounts live outside the repository but still own their names.
    match state
        .user_details_service
        .load_user_by_username(&request.username)
        .await
    {
        Ok(_) => {
            return Err(AppError::conflict(anyhow!(
                "Username {} is already taken",
                request.username
            )));
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err),
    }

    let user = state.user_service.create_user(request).await?;
    track_user_registered();

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}
