use std::env;

use warden_core::errors::DEFAULT_REALM;
use warden_core::password::DEFAULT_COST;

use crate::env_or;

/// Settings for HTTP Basic authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    /// bcrypt work factor for newly encoded passwords.
    pub password_hash_cost: u32,
    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub realm: String,
}

impl SecurityConfig {
    pub fn from_env() -> Self {
        Self {
            password_hash_cost: env_or("PASSWORD_HASH_COST", DEFAULT_COST),
            realm: env::var("BASIC_AUTH_REALM").unwrap_or_else(|_| DEFAULT_REALM.to_string()),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: DEFAULT_COST,
            realm: DEFAULT_REALM.to_string(),
        }
    }
}
