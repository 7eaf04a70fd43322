//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: the HTTP Basic filter that runs in front of every route, and
//!   the [`auth::AuthUser`] extractor handlers use to read the principal
//! - [`role`]: endpoint-level role checks
//!
//! # Request flow
//!
//! 1. [`auth::authenticate`] looks up the access rule for the request path.
//! 2. Basic credentials, when present, are verified; failures are `401`.
//! 3. A protected path without credentials is `401` with a
//!    `WWW-Authenticate: Basic` challenge.
//! 4. Handlers that need a role take [`role::RequireAdmin`] (or check with
//!    [`role::check_role`]); a mismatch is `403`.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::RequireAdmin;
//!
//! async fn admin_only(RequireAdmin(auth_user): RequireAdmin) -> String {
//!     format!("Hello {}", auth_user.username())
//! }
//! ```

pub mod auth;
pub mod role;
