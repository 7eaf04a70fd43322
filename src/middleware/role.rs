//! Endpoint-level role checks.
//!
//! Roles are flat: `ADMIN` does not imply `USER`. Two styles are available:
//! extractors ([`RequireAdmin`], [`RequireUser`]) for handlers that are gated
//! as a whole, and [`check_role`] / [`check_any_role`] for checks inside
//! handler logic.

use axum::{extract::FromRequestParts, http::request::Parts};
use warden_core::AppError;
use warden_models::Role;

use crate::middleware::auth::AuthUser;

const ACCESS_DENIED: &str = "Access Denied";

/// Fails with `403` unless the principal holds `required_role`.
pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AppError> {
    if !auth_user.has_role(required_role) {
        tracing::warn!(
            username = auth_user.username(),
            required = %required_role,
            "Role check failed"
        );
        return Err(AppError::forbidden(ACCESS_DENIED));
    }

    Ok(())
}

/// Fails with `403` unless the principal holds at least one of `allowed_roles`.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !auth_user.has_any_role(allowed_roles) {
        tracing::warn!(
            username = auth_user.username(),
            required = ?allowed_roles,
            "Role check failed"
        );
        return Err(AppError::forbidden(ACCESS_DENIED));
    }

    Ok(())
}

macro_rules! require_role {
    ($(#[$meta:meta])* $name:ident, $role:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &S,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                check_role(&auth_user, $role)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role!(
    /// Principal with the `ADMIN` role.
    RequireAdmin,
    Role::Admin
);
require_role!(
    /// Principal with the `USER` role.
    RequireUser,
    Role::User
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::Principal;
    use axum::http::{Request, StatusCode};

    fn auth_user(roles: Vec<Role>) -> AuthUser {
        AuthUser(Principal {
            username: "fsk".to_string(),
            roles,
        })
    }

    #[test]
    fn test_check_role() {
        assert!(check_role(&auth_user(vec![Role::Admin]), Role::Admin).is_ok());

        let err = check_role(&auth_user(vec![Role::User]), Role::Admin).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admin_does_not_imply_user() {
        assert!(check_role(&auth_user(vec![Role::Admin]), Role::User).is_err());
    }

    #[test]
    fn test_check_any_role() {
        let user = auth_user(vec![Role::User]);
        assert!(check_any_role(&user, &[Role::User, Role::Admin]).is_ok());
        assert!(check_any_role(&user, &[Role::Admin]).is_err());
        assert!(check_any_role(&user, &[]).is_err());
    }

    #[tokio::test]
    async fn test_require_admin_extractor() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(auth_user(vec![Role::Admin]));

        let RequireAdmin(admin) = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(admin.username(), "fsk");
    }

    #[tokio::test]
    async fn test_require_admin_rejects_user() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(auth_user(vec![Role::User]));

        let err = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        assert!(RequireUser::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_principal_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();

        let err = RequireUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
