use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::instrument;
use warden_core::{AppError, PasswordEncoder};
use warden_db::UserRepository;
use warden_models::{CreateUserRequest, User, UserDetails};

use crate::security::UserDetailsService;

/// Thin layer over the user repository.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    password_encoder: PasswordEncoder,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, password_encoder: PasswordEncoder) -> Self {
        Self {
            repository,
            password_encoder,
        }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.repository.find_by_username(username).await
    }

    /// Stores a new `USER` with the password encoded.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, AppError> {
        if self.repository.exists_by_username(&request.username).await? {
            return Err(AppError::conflict(anyhow!(
                "Username {} is already taken",
                request.username
            )));
        }

        let encoder = self.password_encoder;
        let raw_password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || encoder.encode(&raw_password))
            .await
            .map_err(AppError::internal)??;

        let user = User::new(request.name, request.username, password_hash);
        let user = self.repository.save(user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}

/// Authentication lookups backed by [`UserService`].
#[derive(Clone)]
pub struct RepositoryUserDetailsService {
    user_service: UserService,
}

impl RepositoryUserDetailsService {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }
}

#[async_trait]
impl UserDetailsService for RepositoryUserDetailsService {
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AppError> {
        self.user_service
            .get_by_username(username)
            .await?
            .map(UserDetails::from)
            .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", username)))
    }
}
