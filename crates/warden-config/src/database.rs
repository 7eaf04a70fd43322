use std::env;

use crate::env_or;

/// PostgreSQL settings. Without a `DATABASE_URL` users are kept in memory.
#[derive(Clone, Debug, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}
