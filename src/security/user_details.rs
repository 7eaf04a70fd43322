//! Sources of [`UserDetails`] for authentication.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_core::{AppError, PasswordEncoder};
use warden_models::{Role, UserDetails};

/// Loads the account behind a username. A missing account is a `404`
/// [`AppError`]; the authentication middleware turns that into bad
/// credentials.
#[async_trait]
pub trait UserDetailsService: Send + Sync {
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AppError>;
}

fn user_not_found(username: &str) -> AppError {
    AppError::not_found(anyhow!("User {} not found", username))
}

/// Accounts held in process memory. Usernames are case-insensitive.
#[derive(Debug, Default)]
pub struct InMemoryUserDetailsManager {
    users: RwLock<HashMap<String, UserDetails>>,
}

impl InMemoryUserDetailsManager {
    pub fn new(users: impl IntoIterator<Item = UserDetails>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.username.to_lowercase(), user))
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn create_user(&self, user: UserDetails) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let key = user.username.to_lowercase();
        if users.contains_key(&key) {
            return Err(AppError::conflict(anyhow!(
                "User {} already exists",
                user.username
            )));
        }
        users.insert(key, user);
        Ok(())
    }

    pub async fn user_exists(&self, username: &str) -> bool {
        self.users
            .read()
            .await
            .contains_key(&username.to_lowercase())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDetailsService for InMemoryUserDetailsManager {
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AppError> {
        self.users
            .read()
            .await
            .get(&username.to_lowercase())
            .cloned()
            .ok_or_else(|| user_not_found(username))
    }
}

/// The two built-in accounts: `fsk` (USER) and `fsk_admin` (ADMIN). Each
/// password equals the username.
pub fn provisioned_users(encoder: &PasswordEncoder) -> Result<Vec<UserDetails>, AppError> {
    let user = UserDetails::builder()
        .username("fsk")
        .password(encoder.encode("fsk")?)
        .role(Role::User)
        .build()?;
    let admin = UserDetails::builder()
        .username("fsk_admin")
        .password(encoder.encode("fsk_admin")?)
        .role(Role::Admin)
        .build()?;

    Ok(vec![user, admin])
}

/// Asks each delegate in order; the first one that knows the username wins.
#[derive(Clone, Default)]
pub struct DelegatingUserDetailsService {
    delegates: Vec<Arc<dyn UserDetailsService>>,
}

impl DelegatingUserDetailsService {
    pub fn new(delegates: Vec<Arc<dyn UserDetailsService>>) -> Self {
        Self { delegates }
    }

    pub fn with(mut self, delegate: Arc<dyn UserDetailsService>) -> Self {
        self.delegates.push(delegate);
        self
    }
}

#[async_trait]
impl UserDetailsService for DelegatingUserDetailsService {
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AppError> {
        for delegate in &self.delegates {
            match delegate.load_user_by_username(username).await {
                Err(err) if err.is_not_found() => continue,
                result => return result,
            }
        }

        Err(user_not_found(username))
    }
}
