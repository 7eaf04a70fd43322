mod common;

use axum::http::{StatusCode, header};
use common::{body_json, body_text, get, send, setup_test_app};

#[tokio::test]
async fn test_public_is_open() {
    let app = setup_test_app();

    let response = send(&app, get("/public", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello! PUBLIC");
}

#[tokio::test]
async fn test_public_accepts_valid_credentials() {
    let app = setup_test_app();

    let response = send(&app, get("/public", Some(("fsk", "fsk")))).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_rejects_bad_credentials() {
    let app = setup_test_app();

    let response = send(&app, get("/public", Some(("fsk", "nope")))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unmatched_public_subpath_is_not_found() {
    let app = setup_test_app();

    let response = send(&app, get("/public/missing", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = send(&app, get("/public", None)).await;
    let headers = response.headers();

    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, max-age=0, must-revalidate"
    );
    assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(headers.get(header::EXPIRES).unwrap(), "0");
    assert!(headers.get(header::X_FRAME_OPTIONS).is_none());
}

#[tokio::test]
async fn test_security_headers_on_rejections() {
    let app = setup_test_app();

    let response = send(&app, get("/private", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = setup_test_app();

    let response = send(&app, get("/api-docs/openapi.json", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"].get("/private/admin").is_some());
    assert!(body["components"]["securitySchemes"].get("basic_auth").is_some());
}

#[tokio::test]
async fn test_non_ascii_basic_header_is_rejected_on_public_path() {
    use axum::body::Body;
    use axum::http::{HeaderValue, Request};

    let app = setup_test_app();

    let mut request = Request::builder()
        .uri("/public")
        .body(Body::empty())
        .unwrap();
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_bytes(b"Basic \xe4\xbd\xa0").unwrap(),
    );
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid basic authentication token");
}
