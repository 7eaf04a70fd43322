/// Greeting anyone may read
#[utoipa::path(
    get,
    path = "/public",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "Public"
)]
pub async fn hello_public() -> &'static str {
    "Hello! PUBLIC"
}
