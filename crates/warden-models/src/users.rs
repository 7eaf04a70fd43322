//! User domain models and DTOs.
//!
//! [`User`] is what the repository stores. [`UserDetails`] is the narrower
//! view the authentication layer works with; the in-memory accounts exist
//! only in that form.

use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::roles::Role;

/// A registered user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    /// bcrypt hash, never the raw password.
    #[serde(skip_serializing)]
    pub password: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            password: password_hash.into(),
            roles: vec![Role::User],
            created_at: Utc::now(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }
}

/// Payload for `POST /auth/register`.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 3, max = 50, message = "username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(
        length(min = 3, message = "password must be at least 3 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}

/// Public projection of a [`User`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            roles: user.roles,
            created_at: user.created_at,
        }
    }
}

/// The authentication view of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub enabled: bool,
}

impl UserDetails {
    pub fn builder() -> UserDetailsBuilder {
        UserDetailsBuilder::default()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(Role::authority).collect()
    }
}

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            password_hash: user.password,
            roles: user.roles,
            enabled: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct UserDetailsBuilder {
    username: Option<String>,
    password_hash: Option<String>,
    roles: Vec<Role>,
    disabled: bool,
}

impl UserDetailsBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Expects an already encoded password.
    pub fn password(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Accepts role names with or without the `ROLE_` prefix.
    pub fn roles<I, S>(mut self, roles: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for role in roles {
            let role: Role = role.as_ref().parse()?;
            if !self.roles.contains(&role) {
                self.roles.push(role);
            }
        }
        Ok(self)
    }

    pub fn role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn build(self) -> anyhow::Result<UserDetails> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow!("username cannot be empty"))?;
        let Some(password_hash) = self.password_hash else {
            bail!("password cannot be null for user {}", username);
        };

        Ok(UserDetails {
            username,
            password_hash,
            roles: self.roles,
            enabled: !self.disabled,
        })
    }
}
