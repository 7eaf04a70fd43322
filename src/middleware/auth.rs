use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use serde::Serialize;
use utoipa::ToSchema;
use warden_core::{AppError, PasswordEncoder};
use warden_models::{Role, UserDetails};

use crate::metrics::track_auth_attempt;
use crate::state::AppState;

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<UserDetails> for Principal {
    fn from(details: UserDetails) -> Self {
        Self {
            username: details.username,
            roles: details.roles,
        }
    }
}

/// Extractor for the principal the filter chain authenticated.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn roles(&self) -> &[Role] {
        &self.0.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::unauthorized("Full authentication is required to access this resource")
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Credentials {
    None,
    Basic { username: String, password: String },
    Malformed,
}

/// Reads HTTP Basic credentials. Other schemes count as no credentials.
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Credentials {
    let Some(raw) = headers.get(header::AUTHORIZATION) else {
        return Credentials::None;
    };

    if let Some(basic) = headers.typed_get::<Authorization<Basic>>() {
        return Credentials::Basic {
            username: basic.username().to_string(),
            password: basic.password().to_string(),
        };
    }

    // Checked on raw bytes so a non-ASCII Basic value is still malformed.
    let is_basic_scheme = raw
        .as_bytes()
        .split(|b| b.is_ascii_whitespace())
        .find(|token| !token.is_empty())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(b"basic"));

    if is_basic_scheme {
        Credentials::Malformed
    } else {
        Credentials::None
    }
}

async fn password_matches(
    encoder: PasswordEncoder,
    raw_password: &str,
    password_hash: String,
) -> Result<Result<bool, AppError>, AppError> {
    let raw_password = raw_password.to_string();
    tokio::task::spawn_blocking(move || encoder.matches(&raw_password, &password_hash))
        .await
        .map_err(AppError::internal)
}

/// Verifies a username/password pair against the configured accounts.
///
/// Unknown usernames still pay for one bcrypt check against
/// [`AppState::unknown_user_hash`], so response time does not reveal which
/// accounts exist.
pub async fn authenticate_credentials(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<Principal, AppError> {
    let bad_credentials = || AppError::unauthorized("Bad credentials");
    let encoder = state.password_encoder;

    let details = match state
        .user_details_service
        .load_user_by_username(username)
        .await
    {
        Ok(details) => details,
        Err(err) if err.is_not_found() => {
            let unknown_user_hash = state.unknown_user_hash.to_string();
            let _ = password_matches(encoder, password, unknown_user_hash).await?;
            tracing::warn!(username, "Authentication failed: unknown user");
            track_auth_attempt("unknown_user");
            return Err(bad_credentials());
        }
        Err(err) => return Err(err),
    };

    match password_matches(encoder, password, details.password_hash.clone()).await? {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(username, "Authentication failed: bad password");
            track_auth_attempt("bad_password");
            return Err(bad_credentials());
        }
        Err(err) => {
            tracing::warn!(username, error = %err.error, "Stored password is not a bcrypt hash");
            track_auth_attempt("bad_password");
            return Err(bad_credentials());
        }
    }

    if !details.enabled {
        tracing::warn!(username, "Authentication failed: user is disabled");
        track_auth_attempt("disabled");
        return Err(bad_credentials());
    }

    tracing::debug!(username, roles = ?details.roles, "Authenticated");
    track_auth_attempt("success");
    Ok(Principal::from(details))
}

/// The security filter. Decides per path whether a principal is required,
/// authenticates Basic credentials whenever they are sent, and exposes the
/// principal to handlers through [`AuthUser`].
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let realm = state.security_config.realm.clone();
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let principal = match basic_credentials(req.headers()) {
        Credentials::None => None,
        Credentials::Malformed => {
            track_auth_attempt("malformed");
            return AppError::unauthorized("Invalid basic authentication token")
                .with_realm(realm)
                .into_response();
        }
        Credentials::Basic { username, password } => {
            match authenticate_credentials(&state, &username, &password).await {
                Ok(principal) => Some(principal),
                Err(err) => return err.with_realm(realm).into_response(),
            }
        }
    };

    match principal {
        Some(principal) => {
            req.extensions_mut().insert(AuthUser(principal));
        }
        None if state.filter_chain.is_public(&path) => {}
        None => {
            tracing::debug!(path = %path, "Rejecting anonymous request");
            return AppError::unauthorized("Full authentication is required to access this resource")
                .with_realm(realm)
                .into_response();
        }
    }

    next.run(req).await
}
