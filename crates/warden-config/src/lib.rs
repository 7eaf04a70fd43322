//! # Warden Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`server`]: listen address and metrics port
//! - [`security`]: password hashing cost and Basic auth realm
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: optional PostgreSQL connection settings
//!
//! # Example
//!
//! ```ignore
//! use warden_config::{CorsConfig, DatabaseConfig, SecurityConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let security = SecurityConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod security;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            default
        }),
        Err(_) => default,
    }
}
