use crate::modules::private::controller::{current_principal, hello_admin, hello_private};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_private_router() -> Router<AppState> {
    Router::new()
        .route("/", get(hello_private))
        .route("/admin", get(hello_admin))
        .route("/me", get(current_principal))
}
