use crate::modules::public::controller::hello_public;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_public_router() -> Router<AppState> {
    Router::new().route("/", get(hello_public))
}
