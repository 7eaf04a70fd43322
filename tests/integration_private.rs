mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{body_json, body_text, get, send, setup_test_app};

#[tokio::test]
async fn test_private_requires_authentication() {
    let app = setup_test_app();

    let response = send(&app, get("/private", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Realm\""
    );
}

#[tokio::test]
async fn test_private_with_user_credentials() {
    let app = setup_test_app();

    let response = send(&app, get("/private", Some(("fsk", "fsk")))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello! PRIVATE");
}

#[tokio::test]
async fn test_private_with_admin_credentials() {
    let app = setup_test_app();

    let response = send(&app, get("/private", Some(("fsk_admin", "fsk_admin")))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello! PRIVATE");
}

#[tokio::test]
async fn test_private_wrong_password() {
    let app = setup_test_app();

    let response = send(&app, get("/private", Some(("fsk", "wrong")))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad credentials");
}

#[tokio::test]
async fn test_private_unknown_user() {
    let app = setup_test_app();

    let response = send(&app, get("/private", Some(("ghost", "ghost")))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn test_provisioned_usernames_are_case_insensitive() {
    let app = setup_test_app();

    let response = send(&app, get("/private", Some(("FSK", "fsk")))).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_endpoint_allows_admin() {
    let app = setup_test_app();

    let response = send(&app, get("/private/admin", Some(("fsk_admin", "fsk_admin")))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello! ADMIN PRIVATE");
}

#[tokio::test]
async fn test_admin_endpoint_forbids_user() {
    let app = setup_test_app();

    let response = send(&app, get("/private/admin", Some(("fsk", "fsk")))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    let body = body_json(response).await;
    assert_eq!(body["error"], "Access Denied");
}

#[tokio::test]
async fn test_admin_endpoint_requires_authentication() {
    let app = setup_test_app();

    let response = send(&app, get("/private/admin", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_principal() {
    let app = setup_test_app();

    let response = send(&app, get("/private/me", Some(("fsk_admin", "fsk_admin")))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "fsk_admin");
    assert_eq!(body["roles"], serde_json::json!(["ADMIN"]));
}

#[tokio::test]
async fn test_bearer_token_is_not_authentication() {
    let app = setup_test_app();

    let request = Request::builder()
        .uri("/private")
        .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Full authentication is required to access this resource"
    );
}

#[tokio::test]
async fn test_malformed_basic_header() {
    let app = setup_test_app();

    let request = Request::builder()
        .uri("/private")
        .header(header::AUTHORIZATION, "Basic %%%")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid basic authentication token");
}

#[tokio::test]
async fn test_unknown_route_requires_authentication_first() {
    let app = setup_test_app();

    let anonymous = send(&app, get("/nowhere", None)).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let authenticated = send(&app, get("/nowhere", Some(("fsk", "fsk")))).await;
    assert_eq!(authenticated.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_each_request_authenticates_independently() {
    let app = setup_test_app();

    let first = send(&app, get("/private", Some(("fsk", "fsk")))).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert!(!first.headers().contains_key(header::SET_COOKIE));

    let second = send(&app, get("/private", None)).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_handler_role_check_applies_without_filter_rule() {
    use warden::router::init_router;
    use warden::security::{AccessRule, SecurityFilterChain};

    let chain = SecurityFilterChain::builder()
        .permit_all(["/private/**"])
        .any_request(AccessRule::Authenticated)
        .build()
        .unwrap();
    let app = init_router(common::test_state().with_filter_chain(chain));

    let open = send(&app, get("/private", None)).await;
    assert_eq!(open.status(), StatusCode::UNAUTHORIZED);

    let user = send(&app, get("/private/admin", Some(("fsk", "fsk")))).await;
    assert_eq!(user.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_disabled_account_is_rejected() {
    use std::sync::Arc;
    use warden::router::init_router;
    use warden::security::InMemoryUserDetailsManager;
    use warden_models::UserDetails;

    let mut state = common::test_state();
    let disabled = UserDetails::builder()
        .username("locked")
        .password(state.password_encoder.encode("locked").unwrap())
        .roles(["USER"])
        .unwrap()
        .disabled(true)
        .build()
        .unwrap();
    state.user_details_service = Arc::new(InMemoryUserDetailsManager::new([disabled]));
    let app = init_router(state);

    let response = send(&app, get("/private", Some(("locked", "locked")))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad credentials");
}

#[tokio::test]
async fn test_unknown_user_still_checks_a_password_hash() {
    use std::time::{Duration, Instant};
    use warden::router::init_router;
    use warden_core::PasswordEncoder;

    let slow = PasswordEncoder::new(8);
    let slow_hash = slow.encode("irrelevant").unwrap();
    let single_check = (0..2)
        .map(|_| {
            let started = Instant::now();
            let _ = slow.matches("ghost", &slow_hash);
            started.elapsed()
        })
        .min()
        .unwrap_or(Duration::ZERO);

    let mut state = common::test_state();
    assert!(state.unknown_user_hash.starts_with("$2b$04$"));
    state.unknown_user_hash = slow_hash.into();
    let app = init_router(state);

    let started = Instant::now();
    let response = send(&app, get("/private", Some(("ghost", "ghost")))).await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        elapsed >= single_check / 2,
        "unknown user answered in {elapsed:?}, one bcrypt check takes {single_check:?}"
    );
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad credentials");
}
