//! # Warden
//!
//! A small HTTP service showing username/password authentication and
//! role-based authorization with Axum.
//!
//! ## Overview
//!
//! - **Authentication**: HTTP Basic, checked on every request (no sessions)
//! - **Password storage**: bcrypt via [`warden_core::PasswordEncoder`]
//! - **Accounts**: two provisioned in-memory accounts plus users registered
//!   through `POST /auth/register` (in memory, or PostgreSQL when
//!   `DATABASE_URL` is set)
//! - **Authorization**: an ordered path filter chain (public vs.
//!   authenticated) and endpoint-level role checks
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Basic auth filter, AuthUser and role extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Registration
//! │   ├── private/      # Authenticated and admin-only endpoints
//! │   ├── public/       # Open endpoints
//! │   └── users/        # User lookup service
//! ├── security/         # Filter chain rules and user details sources
//! └── ...               # docs, logging, metrics, router, state, validator
//! ```
//!
//! ## Accounts
//!
//! | Username    | Password    | Role  |
//! |-------------|-------------|-------|
//! | `fsk`       | `fsk`       | USER  |
//! | `fsk_admin` | `fsk_admin` | ADMIN |
//!
//! ## Routes
//!
//! | Route                | Access        |
//! |----------------------|---------------|
//! | `GET /public`        | anyone        |
//! | `POST /auth/register`| anyone        |
//! | `GET /private`       | authenticated |
//! | `GET /private/me`    | authenticated |
//! | `GET /private/admin` | role `ADMIN`  |
//!
//! ```bash
//! curl -u fsk_admin:fsk_admin http://localhost:8080/private/admin
//! ```

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod security;
pub mod state;
pub mod validator;

pub use warden_config;
pub use warden_core;
pub use warden_db;
pub use warden_models;
