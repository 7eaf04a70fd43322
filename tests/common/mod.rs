use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use axum_extra::headers::{Authorization, HeaderMapExt};
use http_body_util::BodyExt;
use tower::ServiceExt;
use warden::router::init_router;
use warden::state::AppState;
use warden_config::{CorsConfig, SecurityConfig};
use warden_db::InMemoryUserRepository;

/// Lowest bcrypt cost keeps the suite fast.
pub const TEST_HASH_COST: u32 = 4;

pub fn test_state() -> AppState {
    let security_config = SecurityConfig {
        password_hash_cost: TEST_HASH_COST,
        realm: "Realm".to_string(),
    };

    AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        security_config,
        CorsConfig::default(),
    )
    .unwrap()
}

pub fn setup_test_app() -> Router {
    init_router(test_state())
}

pub fn get(uri: &str, credentials: Option<(&str, &str)>) -> Request<Body> {
    let mut request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    if let Some((username, password)) = credentials {
        request
            .headers_mut()
            .typed_insert(Authorization::basic(username, password));
    }

    request
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
