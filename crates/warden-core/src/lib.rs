//! # Warden Core
//!
//! Foundational types shared by every Warden crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password encoding and verification
//!
//! # Example
//!
//! ```ignore
//! use warden_core::{AppError, PasswordEncoder};
//!
//! let encoder = PasswordEncoder::default();
//! let hash = encoder.encode("fsk")?;
//! assert!(encoder.matches("fsk", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{PasswordEncoder, hash_password, verify_password};
