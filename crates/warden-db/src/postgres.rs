use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;
use warden_core::AppError;
use warden_models::{Role, User};

use crate::UserRepository;

/// Connects to PostgreSQL and applies the bundled migrations.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> anyhow::Result<sqlx::PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(max_connections, "Database pool ready, migrations applied");
    Ok(pool)
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    username: String,
    password: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|role| role.parse::<Role>())
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(AppError::internal)?;

        Ok(User {
            id: row.id,
            name: row.name,
            username: row.username,
            password: row.password,
            roles,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: sqlx::PgPool,
}

impl PgUserRepository {
    pub fn new(db: sqlx::PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, username, password, roles, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user by username")
        .map_err(AppError::database)?;

        row.map(User::try_from).transpose()
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.name().to_string()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, username, password, roles, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&roles)
        .bind(user.created_at)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user.id, username = %user.username, "User inserted");
                Ok(user)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(username = %user.username, "Username already taken");
                Err(AppError::conflict(anyhow!(
                    "Username {} is already taken",
                    user.username
                )))
            }
            Err(e) => {
                tracing::warn!(username = %user.username, error = %e, "Failed to insert user");
                Err(AppError::database(
                    anyhow::Error::new(e).context("Failed to insert user"),
                ))
            }
        }
    }

    async fn count(&self) -> Result<usize, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        Ok(count.max(0) as usize)
    }
}
