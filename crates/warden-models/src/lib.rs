//! # Warden Models
//!
//! Domain models and DTOs shared by the service and the storage layer.
//!
//! - [`roles`]: the coarse permission labels attached to principals
//! - [`users`]: stored users, the authentication view of a user and the
//!   registration DTOs

pub mod roles;
pub mod users;

pub use roles::Role;
pub use users::{CreateUserRequest, MAX_PASSWORD_BYTES, User, UserDetails, UserDetailsBuilder, UserResponse};
