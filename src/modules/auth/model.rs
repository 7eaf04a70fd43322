use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_models::UserResponse;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}
