//! # Warden DB
//!
//! The user repository abstraction and its two backends:
//!
//! - [`memory`]: a process-local map, used when no database is configured
//! - [`postgres`]: SQLx over PostgreSQL
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden_db::{InMemoryUserRepository, UserRepository};
//!
//! let repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! let user = repository.find_by_username("fsk").await?;
//! ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use warden_core::AppError;
use warden_models::User;

pub use memory::InMemoryUserRepository;
pub use postgres::{PgUserRepository, init_db_pool};

/// Storage for registered users. Usernames are unique.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Persist a new user. Fails with `409 Conflict` when the username is taken.
    async fn save(&self, user: User) -> Result<User, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn count(&self) -> Result<usize, AppError>;
}
