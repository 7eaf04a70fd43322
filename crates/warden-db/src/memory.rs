use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_core::AppError;
use warden_models::User;

use crate::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::conflict(anyhow!(
                "Username {} is already taken",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find() {
        let repository = InMemoryUserRepository::new();
        let user = User::new("Folks Dev", "folks", "$2b$04$hash");

        repository.save(user.clone()).await.unwrap();

        assert_eq!(repository.find_by_username("folks").await.unwrap(), Some(user));
        assert!(repository.exists_by_username("folks").await.unwrap());
        assert!(repository.find_by_username("nobody").await.unwrap().is_none());
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repository = InMemoryUserRepository::new();
        repository
            .save(User::new("First", "folks", "$2b$04$a"))
            .await
            .unwrap();

        let err = repository
            .save(User::new("Second", "folks", "$2b$04$b"))
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(repository.count().await.unwrap(), 1);
        assert_eq!(
            repository.find_by_username("folks").await.unwrap().unwrap().name,
            "First"
        );
    }
}
